use crate::catalog::{self, CatalogSetting, SettingGroup, VendorCatalog, BASE_SETTINGS, DOZE_RESET};
use crate::cli::RestrictionLevel;
use crate::domain::models::{CommandTally, DeviceCommand, DeviceIdentity, RevertReport};
use crate::services::restriction::apply_restriction;
use crate::services::transport::{execute_all, CommandTransport};
use crate::services::vendor::revert_vendor;
use tracing::info;

const RESET_ORDER: [&[SettingGroup]; 4] = [
    &[SettingGroup::Doze],
    &[SettingGroup::Animation],
    &[SettingGroup::Connectivity, SettingGroup::BatterySaver],
    &[SettingGroup::DeviceConfig],
];

/// Inverse of every key any tier can set: doze keys first (then doze is
/// re-enabled and unforced), animations, connectivity and saver, then
/// extended device-config keys.
pub fn settings_reset_plan(settings: &[CatalogSetting]) -> Vec<DeviceCommand> {
    let mut plan = Vec::new();
    for groups in RESET_ORDER {
        for g in groups {
            plan.extend(catalog::group(settings, *g).map(CatalogSetting::revert_command));
        }
        if groups.contains(&SettingGroup::Doze) {
            plan.extend(DOZE_RESET.iter().cloned());
        }
    }
    plan
}

/// Back to baseline regardless of what ran before. Nothing is tracked
/// between runs, so the full inverse is always sent.
pub fn revert_all(
    transport: &mut dyn CommandTransport,
    identity: &DeviceIdentity,
    whitelist: &[String],
    vendor: &VendorCatalog,
) -> RevertReport {
    info!("reverting all profiles");
    let mut settings = CommandTally::default();
    execute_all(transport, &settings_reset_plan(BASE_SETTINGS), &mut settings);

    let restriction = apply_restriction(transport, whitelist, RestrictionLevel::Allow);
    let vendor = revert_vendor(transport, vendor, identity);

    info!(
        settings_failed = settings.failed,
        packages = restriction.packages,
        vendor = vendor.applied,
        "revert complete"
    );
    RevertReport {
        settings,
        restriction,
        vendor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ANIMATION_DEFAULT, SAMSUNG};
    use crate::cli::Tier;
    use crate::services::applier::apply_tier;
    use crate::services::transport::fake::FakeDevice;
    use crate::services::vendor::apply_vendor;
    use std::collections::HashSet;

    fn identity(brand: &str) -> DeviceIdentity {
        DeviceIdentity {
            brand: brand.to_string(),
            model: "Test".to_string(),
            os_version: "14".to_string(),
        }
    }

    fn reset_keys(plan: &[DeviceCommand]) -> HashSet<String> {
        plan.iter()
            .filter_map(|c| match c {
                DeviceCommand::Put(a) => Some(format!("{} {}", a.namespace, a.key)),
                DeviceCommand::Delete { namespace, key } => Some(format!("{namespace} {key}")),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn every_forward_key_has_a_revert_entry() {
        let plan = settings_reset_plan(BASE_SETTINGS);
        let covered = reset_keys(&plan);
        for tier in Tier::ALL {
            for (_, a) in catalog::assertions_for(BASE_SETTINGS, tier) {
                assert!(
                    covered.contains(&format!("{} {}", a.namespace, a.key)),
                    "{} {} has no revert",
                    a.namespace,
                    a.key
                );
            }
        }
    }

    #[test]
    fn reset_follows_doze_animation_connectivity_device_config_order() {
        let plan: Vec<String> = settings_reset_plan(BASE_SETTINGS)
            .iter()
            .map(|c| c.to_string())
            .collect();
        let pos = |needle: &str| {
            plan.iter()
                .position(|c| c == needle)
                .unwrap_or_else(|| panic!("missing {needle}"))
        };
        let unforce = pos("dumpsys deviceidle unforce");
        assert!(pos("device_config delete device_idle inactive_to") < unforce);
        assert!(pos("settings delete global device_idle_constants") < unforce);
        assert!(unforce < pos("settings put global window_animation_scale 1.0"));
        assert!(
            pos("settings put global animator_duration_scale 1.0")
                < pos("settings put global ble_scan_always_enabled 1")
        );
        assert!(
            pos("settings put global low_power 0")
                < pos("device_config delete activity_manager_native_boot use_freezer")
        );
    }

    #[test]
    fn revert_after_any_tier_restores_the_same_baseline() {
        let mut baseline = FakeDevice::new("google").with_packages(&["com.a"]);
        revert_all(&mut baseline, &identity("google"), &[], &SAMSUNG);

        for tier in Tier::ALL {
            let mut device = FakeDevice::new("google").with_packages(&["com.a"]);
            apply_tier(&mut device, tier);
            apply_restriction(&mut device, &[], RestrictionLevel::Restrict);
            revert_all(&mut device, &identity("google"), &[], &SAMSUNG);
            assert_eq!(device.settings, baseline.settings, "after {}", tier.as_str());
            assert_eq!(
                device.setting("global", "window_animation_scale"),
                Some(ANIMATION_DEFAULT)
            );
            assert_eq!(
                device.issued_for("com.a").last().copied(),
                Some("am set-standby-bucket com.a active")
            );
        }
    }

    #[test]
    fn revert_is_idempotent() {
        let mut once = FakeDevice::new("samsung").with_packages(&["com.a"]);
        apply_tier(&mut once, Tier::Extreme);
        apply_vendor(&mut once, &SAMSUNG, &identity("samsung"), Tier::Extreme);
        revert_all(&mut once, &identity("samsung"), &[], &SAMSUNG);
        let after_once = (once.settings.clone(), once.disabled.clone());

        revert_all(&mut once, &identity("samsung"), &[], &SAMSUNG);
        assert_eq!((once.settings, once.disabled), after_once);
    }

    #[test]
    fn revert_without_prior_operation_still_sends_full_inverse() {
        let mut device = FakeDevice::new("OtherBrand");
        let report = revert_all(&mut device, &identity("OtherBrand"), &[], &SAMSUNG);
        assert_eq!(
            report.settings.issued,
            settings_reset_plan(BASE_SETTINGS).len()
        );
        assert!(!report.vendor.applied);
        assert!(!device.issued.iter().any(|c| c.starts_with("pm enable")));
    }

    #[test]
    fn revert_re_enables_vendor_packages_on_matching_brand() {
        let mut device = FakeDevice::new("samsung");
        apply_vendor(&mut device, &SAMSUNG, &identity("samsung"), Tier::Aggressive);
        assert!(!device.disabled.is_empty());
        let report = revert_all(&mut device, &identity("samsung"), &[], &SAMSUNG);
        assert!(report.vendor.applied);
        assert!(device.disabled.is_empty());
    }
}
