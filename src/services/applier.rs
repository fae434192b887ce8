use crate::catalog::{self, CatalogSetting, SettingGroup, BASE_SETTINGS, DOZE_ENABLE};
use crate::cli::Tier;
use crate::domain::models::{ApplyReport, CommandTally, DeviceCommand};
use crate::services::transport::{execute, execute_all, CommandTransport};
use tracing::info;

/// Commands applying `tier` from `settings`, in table order. Doze is
/// switched on and forced idle as soon as its keys are written.
pub fn tier_plan(settings: &[CatalogSetting], tier: Tier) -> Vec<DeviceCommand> {
    let mut plan = Vec::new();
    let mut saw_doze = false;
    let mut doze_enabled = false;
    for (group, assertion) in catalog::assertions_for(settings, tier) {
        if group == SettingGroup::Doze {
            saw_doze = true;
        } else if saw_doze && !doze_enabled {
            plan.extend(DOZE_ENABLE.iter().cloned());
            doze_enabled = true;
        }
        plan.push(DeviceCommand::Put(assertion));
    }
    if saw_doze && !doze_enabled {
        plan.extend(DOZE_ENABLE.iter().cloned());
    }
    plan
}

pub fn apply_tier(transport: &mut dyn CommandTransport, tier: Tier) -> ApplyReport {
    info!(tier = tier.as_str(), "applying profile");
    let plan = tier_plan(BASE_SETTINGS, tier);
    let assertions = plan
        .iter()
        .filter(|c| matches!(c, DeviceCommand::Put(_)))
        .count();
    let mut commands = CommandTally::default();
    execute_all(transport, &plan, &mut commands);
    info!(
        tier = tier.as_str(),
        issued = commands.issued,
        failed = commands.failed,
        "profile applied"
    );
    ApplyReport {
        tier,
        assertions,
        commands,
    }
}

/// Write a list of assertions without any follow-up actions.
pub fn apply_assertions(
    transport: &mut dyn CommandTransport,
    settings: &[CatalogSetting],
    tier: Tier,
    tally: &mut CommandTally,
) -> usize {
    let mut count = 0;
    for (_, assertion) in catalog::assertions_for(settings, tier) {
        execute(transport, &DeviceCommand::Put(assertion), tally);
        count += 1;
    }
    count
}
