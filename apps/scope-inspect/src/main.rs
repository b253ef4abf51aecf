//! Scope Inspector
//!
//! Operator tool over a static organization file: shows which rows a user
//! can see and reports broken organization data.
//!
//! # Usage
//!
//! ```bash
//! # Resolved scope of one user, as JSON
//! scope-inspect --config org.yaml resolve --user <UUID>
//!
//! # Would this user see this row?
//! scope-inspect --config org.yaml check --user <UUID> --contract <UUID> --department <UUID> --owner <UUID>
//!
//! # Cycles, cross-contract parents and dangling references (non-zero exit if any)
//! scope-inspect --config org.yaml validate
//! ```

// CLI tools are expected to print to stdout/stderr
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod config;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use org_scope::Service;
use org_scope_sdk::{ContractId, ResourceRef, Scope};
use serde::Serialize;
use uuid::Uuid;

use crate::config::InspectConfig;

/// Scope Inspector - resolve and audit organization scopes
#[derive(Parser, Debug)]
#[command(name = "scope-inspect")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the organization YAML file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the resolved scope of a user
    Resolve {
        #[arg(long)]
        user: Uuid,
    },
    /// Check whether a user can see a resource
    Check {
        #[arg(long)]
        user: Uuid,
        #[arg(long)]
        contract: Uuid,
        #[arg(long)]
        department: Option<Uuid>,
        #[arg(long)]
        owner: Option<Uuid>,
    },
    /// Report integrity problems in the organization data
    Validate {
        /// Only validate this contract
        #[arg(long)]
        contract: Option<Uuid>,
    },
}

#[derive(Serialize)]
struct ResolveOutput {
    user_id: Uuid,
    scope: Scope,
    fallback: Option<String>,
}

#[derive(Serialize)]
struct CheckOutput {
    user_id: Uuid,
    resource: ResourceRef,
    visible: bool,
}

#[derive(Serialize)]
struct ContractReport {
    contract_id: ContractId,
    issues: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.json_logs);

    let config = InspectConfig::load(cli.config.as_deref())?;
    let directory = Arc::new(static_org_plugin::Service::from_config(&config.directory));
    let service = Service::new(directory.clone(), config.org_scope);

    match cli.command {
        Commands::Resolve { user } => {
            let resolution = service.resolve(user).await?;
            print_json(&ResolveOutput {
                user_id: user,
                scope: resolution.scope,
                fallback: resolution.fallback.map(|f| f.to_string()),
            })?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check {
            user,
            contract,
            department,
            owner,
        } => {
            let resource = ResourceRef::new(contract, department, owner);
            let visible = service.is_visible(user, &resource).await?;
            print_json(&CheckOutput {
                user_id: user,
                resource,
                visible,
            })?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Validate { contract } => {
            let contracts = match contract {
                Some(id) => vec![id],
                None => directory.contract_ids(),
            };

            let mut reports = Vec::with_capacity(contracts.len());
            for contract_id in contracts {
                let issues = service.validate_contract(contract_id).await?;
                reports.push(ContractReport {
                    contract_id,
                    issues: issues.iter().map(ToString::to_string).collect(),
                });
            }

            print_json(&reports)?;

            if reports.iter().any(|r| !r.issues.is_empty()) {
                tracing::warn!("organization data has integrity issues");
                return Ok(ExitCode::FAILURE);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
