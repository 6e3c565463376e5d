use serde::Serialize;

/// Per-file change record, kept for the JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct FileChange {
    /// File path relative to the run's root.
    pub path: String,
    /// Number of lines that changed.
    pub lines: usize,
    /// Number of replacements made.
    pub replacements: usize,
}

/// Aggregate counters for one run, built incrementally as each file's
/// patch is produced.
#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    files_scanned: usize,
    files_changed: usize,
    lines_changed: usize,
    total_replacements: usize,
    files_skipped: usize,
    errors: usize,
    files: Vec<FileChange>,
}

impl RunSummary {
    pub(crate) fn record_scanned(&mut self) {
        self.files_scanned += 1;
    }

    pub(crate) fn record_change(&mut self, path: &str, lines: usize, replacements: usize) {
        self.files_changed += 1;
        self.lines_changed += lines;
        self.total_replacements += replacements;
        self.files.push(FileChange {
            path: path.to_string(),
            lines,
            replacements,
        });
    }

    /// A file that was not text (binary or non-UTF-8). Not an error.
    pub(crate) fn record_skipped(&mut self) {
        self.files_skipped += 1;
    }

    pub(crate) fn record_error(&mut self) {
        self.errors += 1;
    }

    /// Number of text files examined.
    pub fn files_scanned(&self) -> usize {
        self.files_scanned
    }

    /// Number of files with at least one replacement.
    pub fn files_changed(&self) -> usize {
        self.files_changed
    }

    /// Total number of lines that changed.
    pub fn lines_changed(&self) -> usize {
        self.lines_changed
    }

    /// Total number of replacements across all files.
    pub fn total_replacements(&self) -> usize {
        self.total_replacements
    }

    /// Number of files skipped as binary/non-text.
    pub fn files_skipped(&self) -> usize {
        self.files_skipped
    }

    /// Number of per-file or per-subtree errors encountered.
    pub fn errors(&self) -> usize {
        self.errors
    }

    pub fn file_changes(&self) -> &[FileChange] {
        &self.files
    }
}

fn plural(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} {} on {} matching {}",
            self.total_replacements,
            plural("replacement", self.total_replacements),
            self.files_changed,
            plural("file", self.files_changed),
        )?;
        if self.files_skipped > 0 {
            write!(
                f,
                " ({} non-text {} skipped)",
                self.files_skipped,
                plural("file", self.files_skipped)
            )?;
        }
        if self.errors > 0 {
            write!(f, " ({} {})", self.errors, plural("error", self.errors))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_to_string() {
        let mut summary = RunSummary::default();
        summary.record_change("a.txt", 1, 3);
        summary.record_change("b.txt", 1, 1);
        assert_eq!(summary.to_string(), "4 replacements on 2 matching files");

        let mut summary = RunSummary::default();
        summary.record_change("a.txt", 1, 1);
        assert_eq!(summary.to_string(), "1 replacement on 1 matching file");
    }

    #[test]
    fn summary_reports_skips_and_errors() {
        let mut summary = RunSummary::default();
        summary.record_skipped();
        summary.record_error();
        assert_eq!(
            summary.to_string(),
            "0 replacements on 0 matching files (1 non-text file skipped) (1 error)"
        );
    }

    #[test]
    fn counters_accumulate() {
        let mut summary = RunSummary::default();
        summary.record_scanned();
        summary.record_scanned();
        summary.record_change("a.txt", 2, 5);
        assert_eq!(summary.files_scanned(), 2);
        assert_eq!(summary.files_changed(), 1);
        assert_eq!(summary.lines_changed(), 2);
        assert_eq!(summary.total_replacements(), 5);
        assert_eq!(summary.file_changes().len(), 1);
        assert_eq!(summary.file_changes()[0].path, "a.txt");
    }
}
