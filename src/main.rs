use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use owo_colors::{OwoColorize, Stream, Style};
use regex::Regex;

use resub::core::{line, walker};
use resub::{log_status, Console, DirectoryPatcher, Query, Settings, Verbosity};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorWhen {
    Always,
    Auto,
    Never,
}

#[derive(Debug, Parser)]
#[command(name = "resub")]
#[command(version = VERSION)]
#[command(about = "Find and replace text across a directory tree")]
#[command(after_help = "
EXAMPLES:
    Preview replacing 'foo' with 'bar'
    $ resub foo bar

    Write the changes to the filesystem
    $ resub --go foo bar

    Replace 'LastName, FirstName' with 'FirstName LastName'
    $ resub '(\\w+), (\\w+)' '$2 $1'

    Replace 'FooBar' with 'SpamEggs', 'foo_bar' with 'spam_eggs', ...
    $ resub --subvert foo_bar spam_eggs
")]
struct Options {
    /// Write the changes to the filesystem (default is a dry run)
    #[arg(long)]
    go: bool,

    /// The pattern to search for
    #[arg(required_unless_present = "type_list")]
    pattern: Option<String>,

    /// The replacement
    #[arg(required_unless_present = "type_list")]
    replacement: Option<String>,

    /// The source path. Defaults to the working directory; '-' reads stdin
    path: Option<PathBuf>,

    /// Interpret the pattern as a raw string. Default is: regex
    #[arg(long)]
    no_regex: bool,

    /// Replace all case variants of the pattern (snake_case, CamelCase and so on)
    #[arg(long, conflicts_with = "word_regex")]
    subvert: bool,

    /// Interpret the pattern as a 'word' regex
    #[arg(short, long)]
    word_regex: bool,

    /// Also patch hidden files
    #[arg(long)]
    hidden: bool,

    /// Also patch ignored files
    #[arg(long)]
    ignored: bool,

    /// Only search files matching <TYPE> or glob pattern
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    selected_file_types: Vec<String>,

    /// Ignore files matching <TYPE> or glob pattern
    #[arg(short = 'T', long = "type-not", value_name = "TYPE")]
    ignored_file_types: Vec<String>,

    /// List the known file types
    #[arg(long)]
    type_list: bool,

    /// Suppress the per-line diff output
    #[arg(short, long)]
    quiet: bool,

    /// Print a JSON report instead of diffs
    #[arg(long)]
    json: bool,

    /// Whether to enable colorful output
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto)]
    color: ColorWhen,
}

fn configure_color(when: ColorWhen) {
    match when {
        ColorWhen::Always => owo_colors::set_override(true),
        ColorWhen::Never => owo_colors::set_override(false),
        ColorWhen::Auto => (),
    }
}

fn build_query(options: &Options, pattern: &str, replacement: &str) -> resub::Result<Query> {
    if options.subvert {
        return Ok(Query::subvert(pattern, replacement));
    }
    if options.no_regex {
        return Ok(Query::substring(pattern, replacement));
    }
    let actual_pattern = if options.word_regex {
        format!(r"\b({})\b", pattern)
    } else {
        pattern.to_string()
    };
    let re = Regex::new(&actual_pattern).map_err(|e| resub::Error::InvalidPattern {
        pattern: pattern.to_string(),
        source: e,
    })?;
    Ok(Query::regex(re, replacement))
}

fn on_type_list() {
    println!("Known file types:");
    for (name, globs) in walker::file_type_definitions() {
        println!(
            "{}: {}",
            name.if_supports_color(Stream::Stdout, |t| t.bold()),
            globs.join(", ")
        );
    }
}

fn run_on_stdin(query: &Query) -> resub::Result<i32> {
    let stdin = std::io::stdin();
    for input in stdin.lock().lines() {
        let input = input.map_err(|e| resub::Error::Read {
            path: PathBuf::from("-"),
            source: e,
        })?;
        match line::patch_line(&input, query) {
            Some(patched) => println!("{patched}"),
            None => println!("{input}"),
        }
    }
    Ok(0)
}

fn run_on_directory(options: &Options, path: &Path, query: &Query) -> resub::Result<i32> {
    let dry_run = !options.go;
    let settings = Settings {
        dry_run,
        hidden: options.hidden,
        ignored: options.ignored,
        selected_file_types: options.selected_file_types.clone(),
        ignored_file_types: options.ignored_file_types.clone(),
    };
    let verbosity = if options.quiet || options.json {
        Verbosity::Quiet
    } else {
        Verbosity::Normal
    };
    let console = Console::with_verbosity(verbosity);

    let mut patcher = DirectoryPatcher::new(&console, path, &settings);
    patcher.run(query)?;
    let summary = patcher.summary();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(0);
    }

    console.print_summary(&summary, dry_run);
    if dry_run && summary.total_replacements() > 0 {
        console.print_message("Re-run resub with --go to write these changes to the filesystem\n");
    }
    Ok(0)
}

fn run(options: &Options) -> resub::Result<i32> {
    if options.type_list {
        on_type_list();
        return Ok(0);
    }

    // Both are present unless --type-list was given; clap enforces it
    let pattern = options.pattern.as_deref().unwrap_or_default();
    let replacement = options.replacement.as_deref().unwrap_or_default();

    configure_color(options.color);
    let query = build_query(options, pattern, replacement)?;

    let path = options
        .path
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    if path == Path::new("-") {
        return run_on_stdin(&query);
    }
    log_status!("scan", "Searching for '{}' under {}", pattern, path.display());
    run_on_directory(options, &path, &query)
}

fn main() {
    let options = match Options::try_parse() {
        Ok(options) => options,
        Err(err) if err.use_stderr() => {
            // Argument errors exit 1, not clap's default 2
            eprint!("{err}");
            process::exit(1);
        }
        Err(err) => {
            // --help and --version
            print!("{err}");
            process::exit(0);
        }
    };

    match run(&options) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!(
                "{}: {}",
                "Error".if_supports_color(Stream::Stderr, |t| t
                    .style(Style::new().red().bold())),
                err
            );
            process::exit(err.exit_code());
        }
    }
}
