use crate::catalog::VendorCatalog;
use crate::cli::Tier;
use crate::domain::models::{CommandTally, DeviceCommand, DeviceIdentity, VendorReport};
use crate::services::applier::apply_assertions;
use crate::services::transport::{execute, CommandTransport};
use tracing::info;

fn not_vendor(catalog: &VendorCatalog, identity: &DeviceIdentity) -> VendorReport {
    info!(brand = %identity.brand, vendor = catalog.brand, "vendor profile skipped");
    VendorReport {
        brand: identity.brand.clone(),
        vendor: catalog.brand,
        applied: false,
        reason: Some(format!("device is not {}", catalog.brand)),
        packages: vec![],
        commands: CommandTally::default(),
    }
}

/// Vendor settings and package disables for `tier`. A different brand is a
/// reported no-op.
pub fn apply_vendor(
    transport: &mut dyn CommandTransport,
    catalog: &VendorCatalog,
    identity: &DeviceIdentity,
    tier: Tier,
) -> VendorReport {
    if !catalog.matches(&identity.brand) {
        return not_vendor(catalog, identity);
    }

    let mut commands = CommandTally::default();
    apply_assertions(transport, catalog.settings, tier, &mut commands);

    let mut packages = Vec::new();
    for package in catalog.packages_for(tier) {
        execute(
            transport,
            &DeviceCommand::DisablePackage(package.id.to_string()),
            &mut commands,
        );
        if package.clear && tier == Tier::Extreme {
            execute(
                transport,
                &DeviceCommand::ClearPackage(package.id.to_string()),
                &mut commands,
            );
        }
        packages.push(package.id.to_string());
    }

    info!(
        vendor = catalog.brand,
        tier = tier.as_str(),
        failed = commands.failed,
        "vendor profile applied"
    );
    VendorReport {
        brand: identity.brand.clone(),
        vendor: catalog.brand,
        applied: true,
        reason: None,
        packages,
        commands,
    }
}

/// Inverse of every vendor setting and re-enable of every vendor package,
/// whatever tier was applied.
pub fn revert_vendor(
    transport: &mut dyn CommandTransport,
    catalog: &VendorCatalog,
    identity: &DeviceIdentity,
) -> VendorReport {
    if !catalog.matches(&identity.brand) {
        return not_vendor(catalog, identity);
    }

    let mut commands = CommandTally::default();
    for setting in catalog.settings {
        execute(transport, &setting.revert_command(), &mut commands);
    }
    let mut packages = Vec::new();
    for package in catalog.packages {
        execute(
            transport,
            &DeviceCommand::EnablePackage(package.id.to_string()),
            &mut commands,
        );
        packages.push(package.id.to_string());
    }

    info!(vendor = catalog.brand, failed = commands.failed, "vendor profile reverted");
    VendorReport {
        brand: identity.brand.clone(),
        vendor: catalog.brand,
        applied: true,
        reason: None,
        packages,
        commands,
    }
}
