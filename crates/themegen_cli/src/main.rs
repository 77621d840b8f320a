//! themegen - generate a block editor theme.json from design tokens
//!
//! Usage:
//!   themegen build [--path <dir>] [--file <template>] [--tokens <file>] [--target <file>]
//!   themegen transform <kind> --tokens <file> [--at <dotted.path>] [--only a,b]

mod config;
mod document;
mod generate;
mod loader;
mod paths;
mod template;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use themegen_core::{transform, AllowList, OutputKind};
use tracing_subscriber::EnvFilter;

use crate::config::{Overrides, ThemegenConfig};
use crate::document::to_pretty_json;
use crate::loader::TokenSource;

#[derive(Parser)]
#[command(name = "themegen")]
#[command(version, about = "Generate a block editor theme.json from design tokens")]
struct Cli {
    /// More log output (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the theme template and write theme.json
    Build(BuildArgs),

    /// Print one transformed token fragment as JSON
    Transform {
        /// Output kind: plain, palette, fontSizes or spacingSizes
        kind: OutputKind,

        /// Token source (JSON, TOML or YAML)
        #[arg(long)]
        tokens: PathBuf,

        /// Dotted path of the token group to transform (default: whole file)
        #[arg(long, default_value = "")]
        at: String,

        /// Comma-separated slugs to keep
        #[arg(long, value_delimiter = ',')]
        only: Vec<String>,
    },
}

#[derive(Args)]
struct BuildArgs {
    /// Config file (default: themegen.toml in the project root, if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Project root
    #[arg(long)]
    path: Option<String>,

    /// Theme template, relative to the root
    #[arg(long)]
    file: Option<String>,

    /// Token source, relative to the root
    #[arg(long)]
    tokens: Option<String>,

    /// Output file, relative to the root
    #[arg(long)]
    target: Option<String>,

    /// `$schema` URL written into the output
    #[arg(long)]
    schema: Option<String>,

    /// theme.json format version
    #[arg(long = "schema-version")]
    schema_version: Option<u32>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let result = match cli.command {
        Command::Build(args) => run_build(args),
        Command::Transform {
            kind,
            tokens,
            at,
            only,
        } => run_transform(kind, &tokens, &at, only),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_build(args: BuildArgs) -> Result<()> {
    let BuildArgs {
        config,
        path,
        file,
        tokens,
        target,
        schema,
        schema_version,
    } = args;

    let mut settings = match config {
        Some(config_path) => ThemegenConfig::load_file(&config_path)?,
        None => ThemegenConfig::load_from_dir(Path::new(path.as_deref().unwrap_or(".")))?,
    };
    settings.apply(Overrides {
        path,
        file,
        tokens,
        target,
        schema,
        version: schema_version,
    });

    generate::generate_theme_json(&settings)?;
    Ok(())
}

fn run_transform(kind: OutputKind, tokens: &Path, at: &str, only: Vec<String>) -> Result<()> {
    let tree = TokenSource::new(tokens).load()?;
    let data = tree.get_path(at);
    if data.is_none() {
        tracing::warn!("no tokens at `{at}` in {}", tokens.display());
    }

    let out = transform(kind, data, &AllowList::from(only));
    println!("{}", to_pretty_json(&out)?);
    Ok(())
}
