use crate::cli::RestrictionLevel;
use crate::domain::models::{CommandTally, DeviceCommand, RestrictReport};
use crate::services::transport::{execute, query, CommandTransport};
use tracing::info;

/// Package ids from `pm list packages` output: the text after the first
/// colon, on lines that have one.
pub fn parse_package_listing(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(_, id)| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect()
}

pub fn list_third_party_packages(transport: &mut dyn CommandTransport) -> Vec<String> {
    let out = query(transport, &DeviceCommand::ListPackages { third_party: true });
    parse_package_listing(&out)
}

pub fn restriction_pair(package: &str, level: RestrictionLevel) -> [DeviceCommand; 2] {
    [
        DeviceCommand::RunInBackground {
            package: package.to_string(),
            level,
        },
        DeviceCommand::StandbyBucket {
            package: package.to_string(),
            level,
        },
    ]
}

/// Set the background level for every third-party package. Whitelisted
/// packages always get the allow pair whatever `level` is.
pub fn apply_restriction(
    transport: &mut dyn CommandTransport,
    whitelist: &[String],
    level: RestrictionLevel,
) -> RestrictReport {
    let packages = list_third_party_packages(transport);
    let (whitelisted, managed): (Vec<String>, Vec<String>) =
        packages.iter().cloned().partition(|p| whitelist.contains(p));

    let mut commands = CommandTally::default();
    for package in &packages {
        let effective = if whitelisted.contains(package) {
            RestrictionLevel::Allow
        } else {
            level
        };
        for command in restriction_pair(package, effective) {
            execute(transport, &command, &mut commands);
        }
    }

    info!(
        level = level.app_ops_mode(),
        packages = packages.len(),
        whitelisted = whitelisted.len(),
        failed = commands.failed,
        "background restriction updated"
    );
    RestrictReport {
        level,
        packages: packages.len(),
        whitelisted,
        managed,
        commands,
    }
}
