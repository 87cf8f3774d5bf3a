use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod commands;

use commands::inspect::{self, OutputFormat};
use commands::migrate::{self, Direction, MigrateArgs};

/// Perm Command Line Interface
///
/// Applies and reverses role/right migrations against a schema snapshot file.
#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the migrations of a plan, in order
    Apply(MigrateArgs),

    /// Reverse the migrations of a plan, last one first
    Reverse(MigrateArgs),

    /// Print the roles and rights held in a schema file
    Show {
        /// Path to the schema snapshot (JSON)
        #[clap(long)]
        schema: PathBuf,

        /// Output format
        #[clap(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Check whether a role holds a right
    Check {
        /// Path to the schema snapshot (JSON)
        #[clap(long)]
        schema: PathBuf,

        /// Role to check
        #[clap(long)]
        role: String,

        /// Right to check
        #[clap(long)]
        right: String,
    },

    /// Print the alterations a plan would run
    #[clap(name = "show-plan")]
    ShowPlan {
        /// Path to the migration plan (TOML)
        #[clap(long)]
        plan: PathBuf,

        /// Only show this migration
        #[clap(long)]
        migration: Option<String>,

        /// Show the alterations reversing would run instead
        #[clap(long)]
        reverse: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Apply(args) => migrate::execute(&args, Direction::Apply)?,
        Commands::Reverse(args) => migrate::execute(&args, Direction::Reverse)?,
        Commands::Show { schema, format } => inspect::show(&schema, format.into())?,
        Commands::Check {
            schema,
            role,
            right,
        } => {
            if !inspect::check(&schema, &role, &right)? {
                return Ok(ExitCode::from(2));
            }
        }
        Commands::ShowPlan {
            plan,
            migration,
            reverse,
        } => inspect::show_plan(&plan, migration.as_deref(), reverse)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
