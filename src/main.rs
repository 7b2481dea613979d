use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser as ClapParser, Subcommand};
use qsdsl::cli::{self, CheckOptions, CliError, Kind};
use qsdsl::{OperatorsConfig, ParseOptions};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "qsdsl")]
#[command(about = "qsdsl - Filter and sort values for URL query strings")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON operator registry (defaults to the standard filter operators)
    #[arg(long, global = true)]
    operators: Option<PathBuf>,

    /// Maximum nesting depth of expressions and lists
    #[arg(long, global = true)]
    max_depth: Option<usize>,

    /// Log parsing and resolution steps
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a value and print its AST as JSON
    Check {
        kind: Kind,

        /// The filter or sort value
        value: String,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print the canonical spelling of a value
    Canonical { kind: Kind, value: String },

    /// Serialize a JSON AST into a value
    Serialize {
        kind: Kind,

        /// JSON AST (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,
    },

    /// Decode percent escapes of unreserved characters
    Normalize { value: String },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let operators = match &cli.operators {
        Some(path) => cli::load_operators(path)?,
        None => OperatorsConfig::standard_filter(),
    };
    let options = match cli.max_depth {
        Some(depth) => ParseOptions::new().with_max_depth(depth)?,
        None => ParseOptions::new(),
    };

    match cli.command {
        Commands::Check { kind, value, pretty } => {
            let output = cli::execute_check(&operators, &CheckOptions { kind, value, parse: options })?;
            let json = if pretty {
                serde_json::to_string_pretty(&output)
            } else {
                serde_json::to_string(&output)
            }?;
            println!("{}", json);
        }
        Commands::Canonical { kind, value } => {
            println!("{}", cli::execute_canonical(&operators, &CheckOptions { kind, value, parse: options })?);
        }
        Commands::Serialize { kind, input } => {
            let input = read_input(input)?;
            println!("{}", cli::execute_serialize(&operators, kind, &input, &options)?);
        }
        Commands::Normalize { value } => println!("{}", qsdsl::normalize(&value)),
    }
    Ok(())
}

fn read_input(input: Option<String>) -> Result<String, CliError> {
    match input {
        Some(s) => Ok(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
        None => Err(CliError::NoInput),
    }
}
