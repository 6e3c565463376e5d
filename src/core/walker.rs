//! Directory traversal.
//!
//! Built on the `ignore` walker: honors `.gitignore`/`.ignore` rules, skips
//! hidden files unless asked otherwise, and never follows symbolic links.
//! Entries come back in a deterministic order (sorted by file name,
//! directories before their children).

use std::path::Path;

use ignore::types::TypesBuilder;
use ignore::{Walk, WalkBuilder};

use crate::core::error::{Error, Result};
use crate::core::settings::Settings;

/// Build a lazy walker over `root` with the given settings.
///
/// Fails only on an invalid file-type selection; per-subtree read errors
/// surface as `Err` entries in the walker's output and are the caller's
/// decision to skip.
pub fn build(root: &Path, settings: &Settings) -> Result<Walk> {
    let mut types_builder = TypesBuilder::new();
    types_builder.add_defaults();
    let mut count: u32 = 0;
    for t in &settings.selected_file_types {
        // A selection containing a glob character is an ad-hoc type
        if t.contains('*') {
            let name = format!("type{}", count);
            types_builder
                .add(&name, t)
                .map_err(|_| Error::FileType(t.clone()))?;
            types_builder.select(&name);
            count += 1;
        } else {
            types_builder.select(t);
        }
    }
    for t in &settings.ignored_file_types {
        if t.contains('*') {
            let name = format!("type{}", count);
            types_builder
                .add(&name, t)
                .map_err(|_| Error::FileType(t.clone()))?;
            types_builder.negate(&name);
            count += 1;
        } else {
            types_builder.negate(t);
        }
    }
    // Unknown type names and malformed globs only surface here
    let types_matcher = types_builder
        .build()
        .map_err(|e| Error::FileType(e.to_string()))?;

    let mut builder = WalkBuilder::new(root);
    builder.types(types_matcher);
    builder.follow_links(false);
    builder.sort_by_file_name(|a, b| a.cmp(b));
    // The builder configures what the walker *ignores*, hence the negations
    if settings.ignored {
        builder.ignore(false);
        builder.git_ignore(false);
        builder.git_exclude(false);
    }
    if settings.hidden {
        builder.hidden(false);
    }

    Ok(builder.build())
}

/// The known file-type definitions, for `--type-list`.
pub fn file_type_definitions() -> Vec<(String, Vec<String>)> {
    let mut types_builder = TypesBuilder::new();
    types_builder.add_defaults();
    types_builder
        .definitions()
        .iter()
        .map(|def| {
            (
                def.name().to_string(),
                def.globs().iter().map(|g| g.to_string()).collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn walk_paths(root: &Path, settings: &Settings) -> Vec<PathBuf> {
        build(root, settings)
            .unwrap()
            .filter_map(|entry| {
                let entry = entry.unwrap();
                if entry.file_type().map_or(false, |t| t.is_file()) {
                    Some(entry.path().strip_prefix(root).unwrap().to_path_buf())
                } else {
                    None
                }
            })
            .collect()
    }

    #[test]
    fn yields_files_in_sorted_order() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("sub/c.txt"), "c").unwrap();

        let paths = walk_paths(dir.path(), &Settings::default());
        assert_eq!(
            paths,
            vec![
                PathBuf::from("a.txt"),
                PathBuf::from("b.txt"),
                PathBuf::from("sub/c.txt"),
            ]
        );
    }

    #[test]
    fn hidden_files_skipped_by_default() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("seen.txt"), "x").unwrap();
        fs::write(dir.path().join(".hidden.txt"), "x").unwrap();

        let paths = walk_paths(dir.path(), &Settings::default());
        assert_eq!(paths, vec![PathBuf::from("seen.txt")]);

        let settings = Settings {
            hidden: true,
            ..Default::default()
        };
        let paths = walk_paths(dir.path(), &settings);
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn ignore_rules_respected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".ignore"), "skipped.txt\n").unwrap();
        fs::write(dir.path().join("skipped.txt"), "x").unwrap();
        fs::write(dir.path().join("kept.txt"), "x").unwrap();

        let paths = walk_paths(dir.path(), &Settings::default());
        assert_eq!(paths, vec![PathBuf::from("kept.txt")]);

        let settings = Settings {
            ignored: true,
            ..Default::default()
        };
        let paths = walk_paths(dir.path(), &settings);
        assert!(paths.contains(&PathBuf::from("skipped.txt")));
    }

    #[test]
    fn type_selection_filters_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("code.rs"), "x").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let settings = Settings {
            selected_file_types: vec!["rust".to_string()],
            ..Default::default()
        };
        let paths = walk_paths(dir.path(), &settings);
        assert_eq!(paths, vec![PathBuf::from("code.rs")]);

        let settings = Settings {
            ignored_file_types: vec!["*.rs".to_string()],
            ..Default::default()
        };
        let paths = walk_paths(dir.path(), &settings);
        assert_eq!(paths, vec![PathBuf::from("notes.txt")]);
    }

    #[test]
    fn unknown_type_is_a_file_type_error() {
        let settings = Settings {
            selected_file_types: vec!["no-such-type".to_string()],
            ..Default::default()
        };
        let err = build(Path::new("."), &settings)
            .err()
            .expect("expected an error for an unknown file type");
        assert_eq!(err.code(), "FILE_TYPE_ERROR");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn type_definitions_not_empty() {
        let defs = file_type_definitions();
        assert!(defs.iter().any(|(name, _)| name == "rust"));
    }
}
