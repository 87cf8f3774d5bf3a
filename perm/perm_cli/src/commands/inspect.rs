//! Read-only commands: show, check and show-plan.

use std::path::Path;

use anyhow::{Context, Result};
use perm_core::{Role, SchemaConfig, SchemaSnapshot};
use perm_migration::{Alteration, MigrationPlan};

use super::load_schema;

/// How to print a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per role
    Text,

    /// The snapshot JSON
    Json,
}

/// Print the roles and rights held in a schema file.
pub fn show(schema_path: &Path, format: OutputFormat) -> Result<()> {
    let snapshot = SchemaSnapshot::load(schema_path)
        .with_context(|| format!("reading schema from {}", schema_path.display()))?;

    match format {
        OutputFormat::Json => println!("{}", snapshot.to_json_string()?),
        OutputFormat::Text => {
            if snapshot.is_empty() {
                println!("No roles");
            }
            for role_name in snapshot.role_names() {
                let rights: Vec<&str> = snapshot
                    .rights_of(role_name.as_str())
                    .into_iter()
                    .flatten()
                    .map(|right| right.as_str())
                    .collect();
                println!("{}: {}", role_name, rights.join(", "));
            }
        }
    }

    Ok(())
}

/// Check whether a role holds a right, printing `allowed` or `denied`.
///
/// A role that does not exist holds no rights.
pub fn check(schema_path: &Path, role: &str, right: &str) -> Result<bool> {
    let schema = load_schema(schema_path, SchemaConfig::default())?;
    let allowed = Role::by_name(&schema, role).is_some_and(|role| role.can_perform(right));

    println!("{}", if allowed { "allowed" } else { "denied" });
    Ok(allowed)
}

/// Print the alterations applying (or reversing) a plan would run.
pub fn show_plan(plan_path: &Path, migration: Option<&str>, reverse: bool) -> Result<()> {
    let plan = MigrationPlan::from_file(plan_path)
        .with_context(|| format!("loading plan from {}", plan_path.display()))?;

    let mut migrations = match migration {
        Some(name) => vec![plan.migration(name)?],
        None => plan.migrations(),
    };
    if reverse {
        migrations.reverse();
    }

    for migration in &migrations {
        println!("{}:", migration.name());

        let alterations: Vec<Alteration> = if reverse {
            migration.inverse_alterations().collect()
        } else {
            migration.alterations().to_vec()
        };
        for alteration in &alterations {
            println!("  {}", alteration);
        }
    }

    Ok(())
}
