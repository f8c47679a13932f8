use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::process;

use canonref_core::{bundled, normalizer, parse, parse_section, Reference, Sections, Style, Table};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

/// canonref — canonical citation parser
///
/// Parse, check, and normalize chapter/verse references.
#[derive(Parser)]
#[command(name = "canonref", version, about, long_about = None)]
struct Cli {
    /// JSON book table to use instead of the bundled one
    #[arg(long, global = true, env = "CANONREF_BOOKS")]
    books: Option<PathBuf>,

    /// Suppress per-reference output from `check`
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Log pipeline details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse references and print them in the chosen style
    Parse {
        /// References such as "Proverbs 31:10-31"
        #[arg(required = true)]
        refs: Vec<String>,
        /// Output style
        #[arg(long, value_enum, default_value_t = OutputStyle::Canonical)]
        format: OutputStyle,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check references; exit 1 if any is invalid
    Check {
        #[arg(required = true)]
        refs: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse Rule of Benedict references ("RB 4:1-5", "Prologue 1")
    Section {
        #[arg(required = true)]
        refs: Vec<String>,
        /// Output style
        #[arg(long, value_enum, default_value_t = OutputStyle::Canonical)]
        format: OutputStyle,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the books of the active table
    Books {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the normalized lookup key for a book name
    Normalize {
        /// Book name or alias
        text: String,
    },

    /// Show version information
    Version,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputStyle {
    Canonical,
    Dotted,
    Human,
}

impl OutputStyle {
    fn style(self, registry: &dyn canonref_core::Registry) -> Style<'_> {
        match self {
            OutputStyle::Canonical => Style::Canonical,
            OutputStyle::Dotted => Style::Dotted,
            OutputStyle::Human => Style::Human(registry),
        }
    }
}

/// Outcome of parsing one input
struct Parsed {
    input: String,
    result: canonref_core::Result<Reference>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match cli.command {
        Commands::Parse { refs, format, json } => match load_table(cli.books.as_deref()) {
            Ok(table) => {
                let parsed = parse_all(&refs, |text| parse(text, &table));
                report(&parsed, format.style(&*table), json)
            }
            Err(code) => code,
        },
        Commands::Check { refs, json } => match load_table(cli.books.as_deref()) {
            Ok(table) => {
                let parsed = parse_all(&refs, |text| parse(text, &table));
                check(&parsed, json, cli.quiet)
            }
            Err(code) => code,
        },
        Commands::Section { refs, format, json } => {
            let parsed = parse_all(&refs, |text| parse_section(text).map(|r| r.to_reference()));
            report(&parsed, format.style(&Sections), json)
        }
        Commands::Books { json } => match load_table(cli.books.as_deref()) {
            Ok(table) => list_books(&table, json),
            Err(code) => code,
        },
        Commands::Normalize { text } => {
            println!("{}", normalizer::normalize_alias(&text));
            0
        }
        Commands::Version => {
            println!(
                "canonref {} (canonref-core {})",
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_VERSION")
            );
            0
        }
    };

    process::exit(exit_code);
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Bundled table unless a path is given. Errors are reported here and
/// turned into exit code 2.
fn load_table(path: Option<&Path>) -> Result<Cow<'static, Table>, i32> {
    let loaded = match path {
        None => bundled::table().map(Cow::Borrowed),
        Some(path) => {
            let data = match std::fs::read(path) {
                Ok(data) => data,
                Err(e) => {
                    eprintln!("{}: cannot read {}: {}", "error".red().bold(), path.display(), e);
                    return Err(2);
                }
            };
            Table::from_json_slice(&data).map(Cow::Owned)
        }
    };

    match loaded {
        Ok(table) => {
            tracing::debug!(books = table.len(), "loaded book table");
            Ok(table)
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            Err(2)
        }
    }
}

fn parse_all(
    refs: &[String],
    mut parse_one: impl FnMut(&str) -> canonref_core::Result<Reference>,
) -> Vec<Parsed> {
    refs.iter()
        .map(|input| Parsed {
            input: input.clone(),
            result: parse_one(input),
        })
        .collect()
}

fn report(parsed: &[Parsed], style: Style<'_>, json: bool) -> i32 {
    let any_invalid = parsed.iter().any(|p| p.result.is_err());

    if json {
        let items: Vec<serde_json::Value> = parsed
            .iter()
            .map(|p| match &p.result {
                Ok(reference) => serde_json::json!({
                    "input": p.input,
                    "valid": true,
                    "reference": reference,
                    "formatted": reference.format(style),
                }),
                Err(e) => serde_json::json!({
                    "input": p.input,
                    "valid": false,
                    "error": { "kind": e.kind().to_string(), "message": e.to_string() },
                }),
            })
            .collect();
        println!("{}", serde_json::Value::Array(items));
    } else {
        for p in parsed {
            match &p.result {
                Ok(reference) => println!("{}", reference.format(style)),
                Err(e) => eprintln!("{}: {}", "error".red().bold(), e),
            }
        }
    }

    if any_invalid {
        1
    } else {
        0
    }
}

fn check(parsed: &[Parsed], json: bool, quiet: bool) -> i32 {
    let invalid = parsed.iter().filter(|p| p.result.is_err()).count();

    if json {
        let output = serde_json::json!({
            "valid": invalid == 0,
            "checked": parsed.len(),
            "errors": invalid,
        });
        println!("{}", output);
    } else if !quiet {
        for p in parsed {
            match &p.result {
                Ok(reference) => println!("{} {} → {}", "valid".green(), p.input, reference),
                Err(e) => println!("{} {}: {}", "invalid".red(), p.input, e),
            }
        }
    }

    if invalid == 0 {
        0
    } else {
        1
    }
}

fn list_books(table: &Table, json: bool) -> i32 {
    if json {
        let records: Vec<_> = table.entities().iter().map(|e| e.to_record()).collect();
        match serde_json::to_string_pretty(&records) {
            Ok(text) => {
                println!("{}", text);
                0
            }
            Err(e) => {
                eprintln!("{}: serialization error: {}", "error".red().bold(), e);
                2
            }
        }
    } else {
        for entity in table.entities() {
            println!(
                "{:<8} {:<24} {:>3}",
                entity.id(),
                entity.display_name(),
                entity.max_chapter()
            );
        }
        0
    }
}
