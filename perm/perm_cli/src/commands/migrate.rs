//! Apply and reverse commands.
//!
//! The schema file is loaded into memory, the migrations run against that
//! copy, and the file is rewritten only if every migration succeeded. A
//! failed run leaves the file as it was.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use perm_core::Schema;
use perm_migration::{Migration, MigrationPlan};
use tracing::info;

use super::{load_config, load_schema};

/// Which way to run a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Apply migrations in plan order
    Apply,

    /// Reverse migrations, last one first
    Reverse,
}

/// Arguments for the apply and reverse commands
#[derive(Args)]
pub struct MigrateArgs {
    /// Path to the migration plan (TOML)
    #[clap(long)]
    pub plan: PathBuf,

    /// Path to the schema snapshot (JSON); created if missing
    #[clap(long)]
    pub schema: PathBuf,

    /// Only run this migration
    #[clap(long)]
    pub migration: Option<String>,

    /// Schema configuration (TOML)
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Print the resulting schema instead of writing it
    #[clap(long)]
    pub dry_run: bool,
}

/// Run a plan against a schema file.
pub fn execute(args: &MigrateArgs, direction: Direction) -> Result<()> {
    let plan = MigrationPlan::from_file(&args.plan)
        .with_context(|| format!("loading plan from {}", args.plan.display()))?;
    let config = load_config(args.config.as_deref())?;
    let mut schema = load_schema(&args.schema, config)?;

    let mut migrations: Vec<Migration> = match &args.migration {
        Some(name) => vec![plan.migration(name)?],
        None => plan.migrations(),
    };
    if direction == Direction::Reverse {
        migrations.reverse();
    }

    for migration in &migrations {
        match direction {
            Direction::Apply => migration.apply(&mut schema)?,
            Direction::Reverse => migration.reverse(&mut schema)?,
        }

        let verb = match direction {
            Direction::Apply => "Applied",
            Direction::Reverse => "Reversed",
        };
        println!(
            "{} migration {} ({} alterations)",
            verb,
            migration.name(),
            migration.len()
        );
    }

    let snapshot = schema.snapshot();
    if args.dry_run {
        println!("{}", snapshot.to_json_string()?);
        return Ok(());
    }

    snapshot
        .save(&args.schema)
        .with_context(|| format!("writing schema to {}", args.schema.display()))?;
    info!(
        "Wrote {} roles to {}",
        snapshot.len(),
        args.schema.display()
    );

    Ok(())
}
