//! Per-file patch computation and atomic commit.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::core::error::{Error, Result};
use crate::core::line;
use crate::core::query::Query;

/// One changed line within a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineEdit {
    /// Line number (1-indexed).
    pub line_no: usize,
    /// The line before replacement, without its line ending.
    pub old: String,
    /// The line after replacement, without its line ending.
    pub new: String,
}

/// The computed edits for one file.
///
/// Computing a patch never touches the source file; [`FilePatch::commit`]
/// is the only write path.
#[derive(Debug)]
pub struct FilePatch {
    path: PathBuf,
    edits: Vec<LineEdit>,
    new_contents: String,
    num_replacements: usize,
}

impl FilePatch {
    /// Read `path` and compute the patch for `query`.
    ///
    /// Returns `Ok(None)` when the file is not valid UTF-8 text — that is
    /// a classification, not an error. Line endings (including `\r\n`) and
    /// the presence or absence of a trailing newline are preserved.
    pub fn compute(path: &Path, query: &Query) -> Result<Option<FilePatch>> {
        let bytes = fs::read(path).map_err(|e| Error::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let Ok(contents) = String::from_utf8(bytes) else {
            return Ok(None);
        };

        let mut edits = Vec::new();
        let mut new_contents = String::with_capacity(contents.len());
        let mut num_replacements = 0;

        for (idx, segment) in contents.split_inclusive('\n').enumerate() {
            let (text, ending) = split_ending(segment);
            let matches = line::find_matches(text, query);
            let new_line = line::apply_matches(text, &matches);
            if matches.is_empty() || new_line == text {
                new_contents.push_str(segment);
                continue;
            }
            num_replacements += matches.len();
            new_contents.push_str(&new_line);
            new_contents.push_str(ending);
            edits.push(LineEdit {
                line_no: idx + 1,
                old: text.to_string(),
                new: new_line,
            });
        }

        Ok(Some(FilePatch {
            path: path.to_path_buf(),
            edits,
            new_contents,
            num_replacements,
        }))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn edits(&self) -> &[LineEdit] {
        &self.edits
    }

    pub fn has_changes(&self) -> bool {
        !self.edits.is_empty()
    }

    /// Number of lines that changed.
    pub fn num_lines(&self) -> usize {
        self.edits.len()
    }

    /// Number of replacements across all lines.
    pub fn num_replacements(&self) -> usize {
        self.num_replacements
    }

    /// Write the new contents over the original file.
    ///
    /// The contents go to a temp file in the same directory, which is then
    /// renamed over the original, so an interrupted write leaves the
    /// original untouched. The temp file cleans itself up on any failure
    /// before the rename.
    pub fn commit(&self) -> Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let write_err = |e: std::io::Error| Error::Write {
            path: self.path.clone(),
            source: e,
        };

        let mut tmp = NamedTempFile::new_in(parent).map_err(write_err)?;
        tmp.write_all(self.new_contents.as_bytes())
            .map_err(write_err)?;
        // Keep the original's permissions on the replacement
        if let Ok(meta) = fs::metadata(&self.path) {
            if let Err(err) = fs::set_permissions(tmp.path(), meta.permissions()) {
                crate::log_status!(
                    "write",
                    "Could not carry permissions of {} onto the rewritten file: {}",
                    self.path.display(),
                    err
                );
            }
        }
        tmp.persist(&self.path).map_err(|e| Error::Write {
            path: self.path.clone(),
            source: e.error,
        })?;
        Ok(())
    }
}

/// Split a `split_inclusive('\n')` segment into its text and line ending.
fn split_ending(segment: &str) -> (&str, &str) {
    if let Some(text) = segment.strip_suffix("\r\n") {
        (text, "\r\n")
    } else if let Some(text) = segment.strip_suffix('\n') {
        (text, "\n")
    } else {
        (segment, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn compute_records_line_numbers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("top.txt");
        fs::write(&path, "first line\nTop: old is nice\nlast line\n").unwrap();

        let patch = FilePatch::compute(&path, &Query::substring("old", "new"))
            .unwrap()
            .unwrap();
        assert_eq!(patch.num_lines(), 1);
        let edit = &patch.edits()[0];
        assert_eq!(edit.line_no, 2);
        assert_eq!(edit.old, "Top: old is nice");
        assert_eq!(edit.new, "Top: new is nice");
    }

    #[test]
    fn commit_writes_new_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("foo.txt");
        fs::write(&path, "first line\nI say: old is nice\nlast line\n").unwrap();

        let patch = FilePatch::compute(&path, &Query::substring("old", "new"))
            .unwrap()
            .unwrap();
        patch.commit().unwrap();
        let actual = fs::read_to_string(&path).unwrap();
        assert_eq!(actual, "first line\nI say: new is nice\nlast line\n");
    }

    #[test]
    fn compute_does_not_touch_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("foo.txt");
        fs::write(&path, "old old old\n").unwrap();

        let patch = FilePatch::compute(&path, &Query::substring("old", "new"))
            .unwrap()
            .unwrap();
        assert!(patch.has_changes());
        assert_eq!(patch.num_replacements(), 3);
        assert_eq!(fs::read_to_string(&path).unwrap(), "old old old\n");
    }

    #[test]
    fn non_utf8_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blob.bin");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x42]).unwrap();

        let patch = FilePatch::compute(&path, &Query::substring("old", "new")).unwrap();
        assert!(patch.is_none());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = FilePatch::compute(Path::new("no/such/file.txt"), &Query::substring("a", "b"))
            .unwrap_err();
        assert_eq!(err.code(), "READ_ERROR");
    }

    #[test]
    fn line_endings_preserved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("crlf.txt");
        fs::write(&path, "old one\r\nold two\nno trailing old").unwrap();

        let patch = FilePatch::compute(&path, &Query::substring("old", "new"))
            .unwrap()
            .unwrap();
        patch.commit().unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "new one\r\nnew two\nno trailing new"
        );
    }

    #[test]
    fn second_run_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("foo.txt");
        fs::write(&path, "this is foo\n").unwrap();
        let query = Query::subvert("foo", "bar");

        let patch = FilePatch::compute(&path, &query).unwrap().unwrap();
        patch.commit().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "this is bar\n");

        let patch = FilePatch::compute(&path, &query).unwrap().unwrap();
        assert!(!patch.has_changes());
    }

    #[test]
    fn failed_commit_cleans_up_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("foo.txt");
        fs::write(&path, "this is old\n").unwrap();

        let patch = FilePatch::compute(&path, &Query::substring("old", "new"))
            .unwrap()
            .unwrap();

        // Replace the target with a directory so the final rename must fail
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();
        let err = patch.commit().unwrap_err();
        assert_eq!(err.code(), "WRITE_ERROR");

        // The temp file must not linger next to the target
        let entries: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(entries, vec!["foo.txt".to_string()]);
    }

    #[test]
    fn interrupted_commit_leaves_original_intact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("foo.txt");
        fs::write(&path, "this is old\n").unwrap();

        let patch = FilePatch::compute(&path, &Query::substring("old", "new"))
            .unwrap()
            .unwrap();

        // Walk the commit steps by hand and stop before the rename, as if
        // the process had died between the temp write and the persist
        {
            let mut tmp = NamedTempFile::new_in(dir.path()).unwrap();
            tmp.write_all(patch.new_contents.as_bytes()).unwrap();
        }

        // The original is byte-identical and nothing else was left behind
        assert_eq!(fs::read_to_string(&path).unwrap(), "this is old\n");
        let entries: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(entries, vec!["foo.txt".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn commit_preserves_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("script.sh");
        fs::write(&path, "echo old\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        let patch = FilePatch::compute(&path, &Query::substring("old", "new"))
            .unwrap()
            .unwrap();
        patch.commit().unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o755);
    }
}
