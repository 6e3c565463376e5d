//! Diff rendering and console output.
//!
//! Patches are rendered as they are produced: a header per file, then each
//! changed line as a removed/added pair with the changed characters
//! highlighted. Colors go through `owo-colors` stream detection so piping
//! the output stays clean.

use owo_colors::{OwoColorize, Stream::Stdout, Style};
use similar::{ChangeTag, TextDiff};

use crate::core::patch::{FilePatch, LineEdit};
use crate::core::stats::RunSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Summary only, no per-line diffs.
    Quiet,
    #[default]
    Normal,
}

/// Prints messages to the console according to a verbosity level.
#[derive(Debug, Default)]
pub struct Console {
    verbosity: Verbosity,
}

impl Console {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_verbosity(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    /// Render one file's diff to standard output.
    pub fn print_patch(&self, patch: &FilePatch) {
        if matches!(self.verbosity, Verbosity::Quiet) {
            return;
        }
        println!(
            "{} {}",
            "Patching".if_supports_color(Stdout, |t| t.blue()),
            patch
                .path()
                .display()
                .if_supports_color(Stdout, |t| t.bold()),
        );
        for edit in patch.edits() {
            print_edit(edit);
        }
        println!();
    }

    /// Final run summary, on standard output.
    pub fn print_summary(&self, summary: &RunSummary, dry_run: bool) {
        let verb = if dry_run { "Would perform" } else { "Performed" };
        println!("{} {}", verb, summary);
    }

    /// Print a message to standard output (suppressed when quiet).
    pub fn print_message(&self, message: &str) {
        if matches!(self.verbosity, Verbosity::Quiet) {
            return;
        }
        print!("{message}");
    }

    /// Print an error to standard error. Never suppressed.
    pub fn print_error(&self, error: &str) {
        eprintln!("{error}");
    }
}

fn print_edit(edit: &LineEdit) {
    let diff = TextDiff::from_chars(edit.old.as_str(), edit.new.as_str());
    let removed = Style::new().red().underline();
    let added = Style::new().green().underline();

    print!("{} ", "--".if_supports_color(Stdout, |t| t.red()));
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Equal => print!("{}", change.value()),
            ChangeTag::Delete => print!(
                "{}",
                change.value().if_supports_color(Stdout, |t| t.style(removed))
            ),
            ChangeTag::Insert => {}
        }
    }
    println!();
    print!("{} ", "++".if_supports_color(Stdout, |t| t.green()));
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Equal => print!("{}", change.value()),
            ChangeTag::Insert => print!(
                "{}",
                change.value().if_supports_color(Stdout, |t| t.style(added))
            ),
            ChangeTag::Delete => {}
        }
    }
    println!();
}
