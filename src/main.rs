//! # Asciify CLI
//!
//! Command-line interface for converting UTF-8 text to ASCII.
//!
//! ## Usage
//!
//! ```bash
//! # List available mapping files
//! asciify mappings
//!
//! # Convert a file (or stdin) line by line
//! asciify convert names.txt
//!
//! # Generate rename commands for every line
//! ls | asciify transform --template 'mv "$1" "$2"'
//!
//! # Keep only the lines that need converting
//! ls | asciify filter
//!
//! # Use a specific mapping
//! asciify --mapping french.map8u convert names.txt
//!
//! # Serve the JSON API
//! asciify serve --listen 127.0.0.1:8080
//! ```

use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::warn;

use asciify::{
    AsciifyError, MappingDirectory, MappingTable, Session,
    logging::{self, LogFormat, LogLevel, LogOptions},
    server::{self, ServerConfig},
    template::DEFAULT_TEMPLATE,
};

/// Asciify - UTF-8 to ASCII conversion utility
#[derive(Parser, Debug)]
#[command(name = "asciify")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding *.map8u mapping files (defaults to `mappings` next to the executable)
    #[arg(long, global = true, value_name = "DIR")]
    mappings_dir: Option<PathBuf>,

    /// Mapping file name inside the mappings directory (defaults to the first one)
    #[arg(long, global = true, value_name = "NAME")]
    mapping: Option<String>,

    /// Load the mapping from an arbitrary file instead
    #[arg(long, global = true, value_name = "PATH", conflicts_with = "mapping")]
    mapping_file: Option<PathBuf>,

    /// Use no mapping: every non-ASCII character becomes `?`
    #[arg(long, global = true, conflicts_with_all = ["mapping", "mapping_file"])]
    no_mapping: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    /// Log format (text, json)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert every line to ASCII
    Convert {
        /// Input file (reads stdin if omitted)
        input: Option<PathBuf>,
    },

    /// Render every line through a template ($1 = original, $2 = converted)
    Transform {
        /// Input file (reads stdin if omitted)
        input: Option<PathBuf>,

        /// One-line template; blank means plain conversion
        #[arg(short, long, default_value = DEFAULT_TEMPLATE)]
        template: String,
    },

    /// Keep only the lines that conversion would change
    Filter {
        /// Input file (reads stdin if omitted)
        input: Option<PathBuf>,
    },

    /// List available mapping files
    Mappings,

    /// Serve the HTTP JSON API
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8080")]
        listen: String,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AsciifyError> {
    run_with(Cli::parse())
}

fn run_with(cli: Cli) -> Result<(), AsciifyError> {
    logging::init(LogOptions::from_env().with_overrides(cli.log_format, cli.log_level));

    let mappings_dir = cli
        .mappings_dir
        .clone()
        .unwrap_or_else(MappingDirectory::default_path);

    match &cli.command {
        Commands::Mappings => {
            let dir = MappingDirectory::open(&mappings_dir)?;
            let names = dir.list()?;
            if names.is_empty() {
                println!("No mapping defined in {}", dir.path().display());
                return Ok(());
            }
            let active = active_listing_entry(&cli, &names);
            println!("Available mappings in {}:", dir.path().display());
            for name in &names {
                let marker = if Some(name.as_str()) == active { "*" } else { " " };
                println!("{} {}", marker, name);
            }
        }

        Commands::Serve { listen } => {
            if cli.mapping_file.is_some() {
                return Err(AsciifyError::InvalidOptions(
                    "--mapping-file is not supported by serve; use --mappings-dir".to_string(),
                ));
            }
            let config = ServerConfig {
                listen_addr: listen.clone(),
                mappings_dir,
                initial_mapping: cli.mapping.clone(),
                no_mapping: cli.no_mapping,
            };
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(config))?;
        }

        Commands::Convert { input } => {
            let session = open_session(&cli, &mappings_dir, input.as_deref(), None)?;
            print!("{}", session.outputs().converted);
        }

        Commands::Transform { input, template } => {
            let session =
                open_session(&cli, &mappings_dir, input.as_deref(), Some(template.as_str()))?;
            print!("{}", session.outputs().transformed);
        }

        Commands::Filter { input } => {
            let mut session = open_session(&cli, &mappings_dir, input.as_deref(), None)?;
            session.remove_unchanged_lines();
            if !session.input().is_empty() {
                println!("{}", session.input());
            }
        }
    }

    Ok(())
}

/// Name to mark as active in the `mappings` listing, if any.
fn active_listing_entry<'a>(cli: &'a Cli, names: &'a [String]) -> Option<&'a str> {
    if cli.no_mapping || cli.mapping_file.is_some() {
        return None;
    }
    cli.mapping
        .as_deref()
        .or_else(|| names.first().map(String::as_str))
}

/// Build a session from the mapping options and the input text.
fn open_session(
    cli: &Cli,
    mappings_dir: &Path,
    input: Option<&Path>,
    template: Option<&str>,
) -> Result<Session, AsciifyError> {
    let mut session = if cli.no_mapping {
        Session::new(MappingTable::new())
    } else if let Some(path) = &cli.mapping_file {
        let bytes = std::fs::read(path)?;
        let table = MappingTable::load_named(&bytes, &path.display().to_string())?;
        let mut session = Session::new(MappingTable::new());
        session.set_table(table, Some(path.display().to_string()));
        session
    } else {
        let dir = MappingDirectory::open(mappings_dir)?;
        match &cli.mapping {
            Some(name) => {
                let mut session = Session::open(dir)?;
                session.select_mapping(Some(name))?;
                session
            }
            None => Session::open(dir)?,
        }
    };

    if session.active_mapping().is_none() && !cli.no_mapping {
        warn!("no mapping loaded; non-ASCII characters become '?'");
    }

    if let Some(template) = template {
        session.set_template(template);
    }
    session.set_input(read_input(input)?);
    Ok(session)
}

/// Read the whole input file, or stdin when no file is given.
fn read_input(path: Option<&Path>) -> Result<String, AsciifyError> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
