/// Settings applied for a [`crate::DirectoryPatcher`] run.
#[derive(Debug, Default)]
pub struct Settings {
    /// If true, compute and report changes without writing them (default: false)
    pub dry_run: bool,
    /// If true, also patch hidden files (default: false)
    pub hidden: bool,
    /// If true, also patch ignored files (default: false)
    pub ignored: bool,
    /// List of file types or globs to select (default: empty)
    pub selected_file_types: Vec<String>,
    /// List of file types or globs to skip (default: empty)
    pub ignored_file_types: Vec<String>,
}
