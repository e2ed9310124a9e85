//! intent-sql — translate query intents from the command line
//!
//! # Usage
//!
//! ```bash
//! # Translate an intent
//! intent-sql "find::users[active=true][^!created_at][lim=10]"
//!
//! # Translate a JSON or TOML intent document
//! intent-sql --file intent.json --format json
//!
//! # Show how an intent is understood
//! intent-sql explain "update::users{name='x'}[id=7]"
//! ```

use clap::{Parser, Subcommand};
use colored::*;
use intent_sql::config::{Config, OutputFormat};
use intent_sql::prelude::*;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "intent-sql")]
#[command(version)]
#[command(about = "Translate query intents into parameterized MySQL statements", long_about = None)]
#[command(after_help = "EXAMPLES:
    intent-sql 'find::users[name=test][lim=2][off=10]'
    intent-sql 'create::users{name=test, age=42}' --format json
    intent-sql --file intent.toml")]
struct Cli {
    /// The intent to translate
    intent: Option<String>,

    /// Read an intent document (.json or .toml) instead
    #[arg(long, conflicts_with = "intent")]
    file: Option<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Configuration file path
    #[arg(long, env = "INTENT_SQL_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and explain an intent
    Explain {
        /// The intent to explain
        intent: String,
    },
    /// Show the intent syntax reference
    Symbols,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("intent_sql=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }
    let format = cli.format.unwrap_or(config.output.format);

    match &cli.command {
        Some(Commands::Explain { intent }) => explain_intent(intent)?,
        Some(Commands::Symbols) => show_symbols(),
        None => {
            let translator = if let Some(path) = &cli.file {
                load_document(path)?
            } else if let Some(intent) = &cli.intent {
                if cli.verbose {
                    eprintln!("{} {}", "Input:".dimmed(), intent.yellow());
                }
                Translator::from_syntax(intent)?
            } else {
                println!("{}", "intent-sql — query intents to MySQL statements".cyan().bold());
                println!();
                println!("Usage: intent-sql <INTENT> [OPTIONS]");
                println!();
                println!("Try: intent-sql --help");
                return Ok(());
            };

            print_statement(&translator.into_statement(), format)?;
        }
    }

    Ok(())
}

/// Load a `.json` or `.toml` intent document.
fn load_document(path: &Path) -> anyhow::Result<Translator> {
    let content = std::fs::read_to_string(path).map_err(TranslateError::from)?;
    tracing::debug!("Read intent document {}", path.display());

    let translator = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => Translator::from_toml(&content)?,
        _ => Translator::from_json(&content)?,
    };
    Ok(translator)
}

fn print_statement(stmt: &Statement, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(stmt)?);
        }
        OutputFormat::Text => {
            println!("{}", "Statement:".green().bold());
            println!("  {}", stmt.sql().white());
            println!();
            println!("{}", "Parameters:".cyan());
            let bindings = stmt.placeholders().into_iter().zip(stmt.params());
            for (i, (placeholder, param)) in bindings.enumerate() {
                println!(
                    "  {:>2}. {:2} {}",
                    i + 1,
                    placeholder.as_str().dimmed(),
                    param.to_string().yellow()
                );
            }
        }
    }
    Ok(())
}

fn explain_intent(input: &str) -> anyhow::Result<()> {
    println!("{}", "Intent Explanation".cyan().bold());
    println!();
    println!("{} {}", "Input:".dimmed(), input.yellow());
    println!();

    let intent = intent_sql::parse(input)?;

    println!("{}", "Parsed Intent:".green().bold());
    println!("  {} {}", "Action:".dimmed(), intent.action().to_string().cyan());
    println!("  {} {}", "Model:".dimmed(), intent.model().white());

    if let Some(values) = intent.values() {
        println!("  {}", "Values:".dimmed());
        for (field, value) in values {
            println!("    • {} = {}", field.white(), value.to_string().yellow());
        }
    }

    if let Some(criteria) = intent.criteria() {
        println!("  {}", "Criteria:".dimmed());
        for (field, value) in criteria {
            println!("    • {} = {}", field.white(), value.to_string().yellow());
        }
    }

    if let Some(sort) = intent.sort() {
        println!("  {}", "Sort:".dimmed());
        for key in sort {
            let dir = match key.direction {
                Direction::Asc => "↑".to_string(),
                Direction::Desc => "↓".to_string(),
                Direction::Other(n) => format!("({})", n),
            };
            println!("    • {} {}", key.field.white(), dir.cyan());
        }
    }

    if let Some(limit) = intent.limit() {
        println!("  {} {}", "Limit:".dimmed(), limit.to_string().cyan());
    }
    if let Some(offset) = intent.offset() {
        println!("  {} {}", "Offset:".dimmed(), offset.to_string().cyan());
    }

    println!();
    print_statement(&Translator::new(intent).into_statement(), OutputFormat::Text)
}

fn show_symbols() {
    println!("{}", "Intent Syntax Reference".cyan().bold());
    println!();

    let symbols = [
        ("::", "Gate", "Separates action and model", "find::users"),
        ("{}", "Payload", "Values to write", "SET ?"),
        ("[a=v]", "Cage", "Equality criterion", "WHERE ?"),
        ("&", "Bind", "Another criterion", "AND ?"),
        ("[^f]", "Rise", "Sort ascending", "ORDER BY ?? ASC"),
        ("[^!f]", "Peak", "Sort descending", "ORDER BY ?? DESC"),
        ("[lim=N]", "Limit", "Row limit", "LIMIT 0, ?"),
        ("[off=N]", "Offset", "Rows to skip (needs lim)", "LIMIT ?, ?"),
    ];

    println!(
        "{:10} {:10} {:30} {}",
        "Symbol".white().bold(),
        "Name".white().bold(),
        "Function".white().bold(),
        "SQL Equivalent".white().bold()
    );
    println!("{}", "─".repeat(80).dimmed());

    for (symbol, name, function, sql) in symbols {
        println!(
            "{:10} {:10} {:30} {}",
            symbol.cyan().bold(),
            name.yellow(),
            function.white(),
            sql.dimmed()
        );
    }

    println!();
    println!(
        "{} {}",
        "Actions:".dimmed(),
        Action::ALL.map(Action::tag).join(", ").white()
    );
}
