//! Runs a replacement query over every text file under a root path.
//!
//! Files are processed one at a time: each patch is fully computed, handed
//! to the console, and (outside dry-run) committed before the next file is
//! read. Per-file and per-subtree failures are reported and counted but
//! never abort the run; only an unwalkable root does.

use std::fs;
use std::path::Path;

use crate::core::console::Console;
use crate::core::error::{Error, Result};
use crate::core::patch::FilePatch;
use crate::core::query::Query;
use crate::core::settings::Settings;
use crate::core::stats::RunSummary;
use crate::core::walker;

/// Runs a replacement query on every text file present in a given path.
///
/// ```no_run
/// use resub::{Console, DirectoryPatcher, Query, Settings};
/// use std::path::Path;
///
/// let settings = Settings {
///     dry_run: true,
///     ..Default::default()
/// };
/// let console = Console::new();
/// let mut patcher = DirectoryPatcher::new(&console, Path::new("."), &settings);
/// patcher.run(&Query::substring("old", "new")).unwrap();
/// let summary = patcher.summary();
/// println!("{} lines would change", summary.lines_changed());
/// ```
pub struct DirectoryPatcher<'a> {
    root: &'a Path,
    settings: &'a Settings,
    console: &'a Console,
    summary: RunSummary,
}

impl<'a> DirectoryPatcher<'a> {
    pub fn new(console: &'a Console, root: &'a Path, settings: &'a Settings) -> Self {
        Self {
            root,
            settings,
            console,
            summary: RunSummary::default(),
        }
    }

    /// Run the query over the whole tree.
    ///
    /// Returns `Err` only when the root itself cannot be read or the
    /// settings select an unknown file type.
    pub fn run(&mut self, query: &Query) -> Result<()> {
        fs::metadata(self.root).map_err(|e| Error::Read {
            path: self.root.to_path_buf(),
            source: e,
        })?;
        let walker = walker::build(self.root, self.settings)?;
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let err = Error::Walk(err);
                    self.console.print_error(&err.to_string());
                    self.summary.record_error();
                    continue;
                }
            };
            if entry.file_type().map_or(false, |t| t.is_file()) {
                self.patch_file(entry.path(), query);
            }
        }
        Ok(())
    }

    pub fn summary(self) -> RunSummary {
        self.summary
    }

    fn patch_file(&mut self, path: &Path, query: &Query) {
        let patch = match FilePatch::compute(path, query) {
            Ok(Some(patch)) => patch,
            Ok(None) => {
                self.summary.record_skipped();
                return;
            }
            Err(err) => {
                self.console.print_error(&err.to_string());
                self.summary.record_error();
                return;
            }
        };
        self.summary.record_scanned();
        if !patch.has_changes() {
            return;
        }
        self.console.print_patch(&patch);
        let relative = path.strip_prefix(self.root).unwrap_or(path);
        self.summary.record_change(
            &relative.to_string_lossy(),
            patch.num_lines(),
            patch.num_replacements(),
        );
        if self.settings.dry_run {
            return;
        }
        if let Err(err) = patch.commit() {
            self.console.print_error(&err.to_string());
            self.summary.record_error();
        }
    }
}
