use crate::cli::{Commands, WhitelistCommands};
use crate::commands::session::Session;
use crate::domain::models::{WhitelistChange, WhitelistEntry};
use crate::services::device::require_device;
use crate::services::output::{
    apply_line, maintenance_line, print_one, print_out, restrict_line, revert_line, status_line,
    vendor_line,
};
use crate::services::restriction::list_third_party_packages;
use crate::services::storage::audit;
use crate::services::transport::CommandTransport;
use crate::services::whitelist::{
    looks_fully_qualified, parse_index, resolve_search, search, AddOutcome, RemoveOutcome,
    WhitelistStore,
};
use serde_json::json;
use std::path::Path;

pub fn handle_runtime_commands(
    json: bool,
    command: &Commands,
    session: &mut Session,
) -> anyhow::Result<()> {
    match command {
        Commands::Status => print_one(json, session.status(), status_line)?,
        Commands::Apply { tier } => print_one(json, session.apply(*tier), apply_line)?,
        Commands::Restrict { level } => print_one(json, session.restrict(*level)?, restrict_line)?,
        Commands::Vendor { tier } => print_one(json, session.vendor(*tier), vendor_line)?,
        Commands::OptimizeBackground => {
            print_one(json, session.optimize_background(), maintenance_line)?
        }
        Commands::Revert => print_one(json, session.revert(), revert_line)?,
        Commands::Whitelist { .. } | Commands::Menu => {
            anyhow::bail!("not a one-shot device command: {:?}", command)
        }
    }
    Ok(())
}

/// Whitelist edits work offline; only resolving a partial name and `search`
/// ask the device for its package list.
pub fn handle_whitelist_commands(
    json: bool,
    command: &WhitelistCommands,
    store: &WhitelistStore,
    transport: &mut dyn CommandTransport,
    audit_log: Option<&Path>,
) -> anyhow::Result<()> {
    match command {
        WhitelistCommands::List => {
            let entries: Vec<WhitelistEntry> = store
                .load()?
                .into_iter()
                .enumerate()
                .map(|(i, package)| WhitelistEntry {
                    index: i + 1,
                    package,
                })
                .collect();
            if entries.is_empty() && !json {
                println!("whitelist is empty ({})", store.path().display());
            } else {
                print_out(json, &entries, |e| format!("{}. {}", e.index, e.package))?;
            }
        }
        WhitelistCommands::Add { package, pick } => {
            let id = if looks_fully_qualified(package) {
                package.trim().to_string()
            } else {
                require_device(transport)?;
                let installed = list_third_party_packages(transport);
                resolve_search(package, &search(&installed, package), *pick)?
            };
            let outcome = store.add(&id)?;
            let (status, package) = match outcome {
                AddOutcome::Added(p) => {
                    audit(audit_log, "whitelist-add", json!({ "package": p }));
                    ("added", p)
                }
                AddOutcome::AlreadyPresent(p) => ("already_present", p),
            };
            let change = WhitelistChange {
                action: "add",
                status,
                package: Some(package),
                whitelist: store.load()?,
            };
            print_one(json, change, |c| match c.status {
                "added" => format!("added {} to whitelist", c.package.as_deref().unwrap_or("")),
                _ => format!("{} is already whitelisted", c.package.as_deref().unwrap_or("")),
            })?;
        }
        WhitelistCommands::Remove { index } => {
            let (status, package, message) = match parse_index(index) {
                None => ("invalid_index", None, format!("invalid index '{}'", index)),
                Some(i) => match store.remove(i)? {
                    RemoveOutcome::Removed(p) => {
                        audit(audit_log, "whitelist-remove", json!({ "package": p }));
                        let msg = format!("removed {} from whitelist", p);
                        ("removed", Some(p), msg)
                    }
                    RemoveOutcome::OutOfRange { index, len } => (
                        "out_of_range",
                        None,
                        format!("no whitelist entry {} ({} entries)", index, len),
                    ),
                },
            };
            let change = WhitelistChange {
                action: "remove",
                status,
                package,
                whitelist: store.load()?,
            };
            print_one(json, change, |_| message.clone())?;
        }
        WhitelistCommands::Search { query } => {
            require_device(transport)?;
            let installed = list_third_party_packages(transport);
            let matches: Vec<WhitelistEntry> = search(&installed, query)
                .into_iter()
                .enumerate()
                .map(|(i, package)| WhitelistEntry {
                    index: i + 1,
                    package,
                })
                .collect();
            print_out(json, &matches, |e| format!("{}. {}", e.index, e.package))?;
        }
    }
    Ok(())
}
