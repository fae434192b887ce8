//! Static profile tables.
//!
//! Each key is listed once with its value per tier and the value that
//! restores it. A tier's value is the one defined at the highest tier at or
//! below it, so higher tiers extend and override lower ones. Table order is
//! application order.

use crate::cli::Tier;
use crate::domain::models::{DeviceCommand, Namespace, SettingAssertion};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingGroup {
    Doze,
    Animation,
    Connectivity,
    BatterySaver,
    DeviceConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierValues {
    pub safe: Option<&'static str>,
    pub aggressive: Option<&'static str>,
    pub extreme: Option<&'static str>,
}

impl TierValues {
    /// Revert-only entry: no tier writes it.
    pub const NONE: TierValues = TierValues {
        safe: None,
        aggressive: None,
        extreme: None,
    };

    pub const fn all(v: &'static str) -> Self {
        Self {
            safe: Some(v),
            aggressive: None,
            extreme: None,
        }
    }

    pub const fn tiered(
        safe: &'static str,
        aggressive: Option<&'static str>,
        extreme: Option<&'static str>,
    ) -> Self {
        Self {
            safe: Some(safe),
            aggressive,
            extreme,
        }
    }

    pub const fn from_aggressive(v: &'static str) -> Self {
        Self {
            safe: None,
            aggressive: Some(v),
            extreme: None,
        }
    }

    pub const fn extreme_only(v: &'static str) -> Self {
        Self {
            safe: None,
            aggressive: None,
            extreme: Some(v),
        }
    }

    pub fn value_for(&self, tier: Tier) -> Option<&'static str> {
        match tier {
            Tier::Safe => self.safe,
            Tier::Aggressive => self.aggressive.or(self.safe),
            Tier::Extreme => self.extreme.or(self.aggressive).or(self.safe),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevertAction {
    Put(&'static str),
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogSetting {
    pub group: SettingGroup,
    pub namespace: Namespace,
    pub key: &'static str,
    pub values: TierValues,
    pub revert: RevertAction,
}

impl CatalogSetting {
    pub fn assertion_for(&self, tier: Tier) -> Option<SettingAssertion> {
        self.values.value_for(tier).map(|value| SettingAssertion {
            namespace: self.namespace,
            key: self.key,
            value,
        })
    }

    pub fn revert_command(&self) -> DeviceCommand {
        match self.revert {
            RevertAction::Put(value) => DeviceCommand::Put(SettingAssertion {
                namespace: self.namespace,
                key: self.key,
                value,
            }),
            RevertAction::Delete => DeviceCommand::Delete {
                namespace: self.namespace,
                key: self.key,
            },
        }
    }
}

const fn setting(
    group: SettingGroup,
    namespace: Namespace,
    key: &'static str,
    values: TierValues,
    revert: RevertAction,
) -> CatalogSetting {
    CatalogSetting {
        group,
        namespace,
        key,
        values,
        revert,
    }
}

const fn doze(key: &'static str, values: TierValues) -> CatalogSetting {
    setting(
        SettingGroup::Doze,
        Namespace::DEVICE_IDLE,
        key,
        values,
        RevertAction::Delete,
    )
}

const fn animation(key: &'static str) -> CatalogSetting {
    setting(
        SettingGroup::Animation,
        Namespace::Global,
        key,
        TierValues::tiered("0.5", None, Some("0")),
        RevertAction::Put(ANIMATION_DEFAULT),
    )
}

pub const ANIMATION_DEFAULT: &str = "1.0";

const SAVER_CONSTANTS: &str = "advertise_is_enabled=true,datasaver_disabled=false,enable_night_mode=true,launch_boost_disabled=true,vibration_disabled=true,animation_disabled=true,soundtrigger_disabled=true,fullbackup_deferred=true,keyvaluebackup_deferred=true,firewall_disabled=true,gps_mode=0,adjust_brightness_disabled=false,adjust_brightness_factor=2,force_all_apps_standby=true,force_background_check=true,optional_sensors_disabled=true,aod_disabled=false,quick_doze_enabled=true";

const SAVER_CONSTANTS_EXTREME: &str = "advertise_is_enabled=true,datasaver_disabled=false,enable_night_mode=true,launch_boost_disabled=true,vibration_disabled=true,animation_disabled=true,soundtrigger_disabled=true,fullbackup_deferred=true,keyvaluebackup_deferred=true,firewall_disabled=false,gps_mode=2,adjust_brightness_disabled=false,adjust_brightness_factor=0.5,force_all_apps_standby=true,force_background_check=true,optional_sensors_disabled=true,aod_disabled=true,quick_doze_enabled=true";

pub static BASE_SETTINGS: &[CatalogSetting] = &[
    doze("light_after_inactive_to", TierValues::all("0")),
    doze(
        "light_pre_idle_to",
        TierValues::tiered("30000", None, Some("15000")),
    ),
    doze("light_idle_to", TierValues::all("15000")),
    doze("light_idle_factor", TierValues::all("2")),
    doze("light_max_idle_to", TierValues::all("60000")),
    doze(
        "inactive_to",
        TierValues::tiered("30000", Some("15000"), Some("10000")),
    ),
    doze("sensing_to", TierValues::all("0")),
    doze("locating_to", TierValues::all("0")),
    doze("motion_inactive_to", TierValues::all("0")),
    doze("idle_after_inactive_to", TierValues::all("0")),
    doze(
        "quick_doze_delay_to",
        TierValues::tiered("10000", Some("5000"), Some("2000")),
    ),
    // Legacy constants string; older builds read doze timings from here.
    setting(
        SettingGroup::Doze,
        Namespace::Global,
        "device_idle_constants",
        TierValues::NONE,
        RevertAction::Delete,
    ),
    animation("window_animation_scale"),
    animation("transition_animation_scale"),
    animation("animator_duration_scale"),
    setting(
        SettingGroup::Connectivity,
        Namespace::Global,
        "ble_scan_always_enabled",
        TierValues::all("0"),
        RevertAction::Put("1"),
    ),
    setting(
        SettingGroup::Connectivity,
        Namespace::System,
        "nearby_scanning_enabled",
        TierValues::all("0"),
        RevertAction::Put("1"),
    ),
    setting(
        SettingGroup::Connectivity,
        Namespace::Global,
        "wifi_scan_throttle_enabled",
        TierValues::all("1"),
        RevertAction::Delete,
    ),
    setting(
        SettingGroup::Connectivity,
        Namespace::Global,
        "mobile_data_always_on",
        TierValues::all("0"),
        RevertAction::Put("1"),
    ),
    setting(
        SettingGroup::Connectivity,
        Namespace::Global,
        "wifi_power_save",
        TierValues::all("1"),
        RevertAction::Delete,
    ),
    setting(
        SettingGroup::Connectivity,
        Namespace::Global,
        "wifi_scan_always_enabled",
        TierValues::extreme_only("0"),
        RevertAction::Put("1"),
    ),
    setting(
        SettingGroup::BatterySaver,
        Namespace::Global,
        "cached_apps_freezer",
        TierValues::all("enabled"),
        RevertAction::Put("device_default"),
    ),
    setting(
        SettingGroup::BatterySaver,
        Namespace::Global,
        "adaptive_battery_management_enabled",
        TierValues::all("1"),
        RevertAction::Put("1"),
    ),
    setting(
        SettingGroup::BatterySaver,
        Namespace::Global,
        "battery_saver_constants",
        TierValues::tiered(SAVER_CONSTANTS, None, Some(SAVER_CONSTANTS_EXTREME)),
        RevertAction::Delete,
    ),
    setting(
        SettingGroup::BatterySaver,
        Namespace::Global,
        "low_power",
        TierValues::from_aggressive("1"),
        RevertAction::Put("0"),
    ),
    setting(
        SettingGroup::BatterySaver,
        Namespace::Global,
        "low_power_sticky",
        TierValues::extreme_only("1"),
        RevertAction::Put("0"),
    ),
    setting(
        SettingGroup::DeviceConfig,
        Namespace::DeviceConfig("activity_manager"),
        "bg_current_drain_auto_restrict_abusive_apps_enabled",
        TierValues::all("1"),
        RevertAction::Delete,
    ),
    setting(
        SettingGroup::DeviceConfig,
        Namespace::DeviceConfig("app_hibernation"),
        "app_hibernation_enabled",
        TierValues::all("1"),
        RevertAction::Delete,
    ),
    setting(
        SettingGroup::DeviceConfig,
        Namespace::DeviceConfig("activity_manager_native_boot"),
        "use_freezer",
        TierValues::extreme_only("true"),
        RevertAction::Delete,
    ),
    setting(
        SettingGroup::DeviceConfig,
        Namespace::DeviceConfig("activity_manager"),
        "max_cached_processes",
        TierValues::extreme_only("16"),
        RevertAction::Delete,
    ),
];

/// Issued right after the doze keys when applying a tier.
pub static DOZE_ENABLE: &[DeviceCommand] = &[
    DeviceCommand::Dumpsys {
        service: "deviceidle",
        args: &["enable"],
    },
    DeviceCommand::Dumpsys {
        service: "deviceidle",
        args: &["force-idle"],
    },
];

/// Issued right after the doze keys are deleted on revert.
pub static DOZE_RESET: &[DeviceCommand] = &[
    DeviceCommand::Dumpsys {
        service: "deviceidle",
        args: &["enable"],
    },
    DeviceCommand::Dumpsys {
        service: "deviceidle",
        args: &["unforce"],
    },
];

pub fn assertions_for<'a>(
    settings: &'a [CatalogSetting],
    tier: Tier,
) -> impl Iterator<Item = (SettingGroup, SettingAssertion)> + 'a {
    settings
        .iter()
        .filter_map(move |s| s.assertion_for(tier).map(|a| (s.group, a)))
}

pub fn group<'a>(
    settings: &'a [CatalogSetting],
    group: SettingGroup,
) -> impl Iterator<Item = &'a CatalogSetting> + 'a {
    settings.iter().filter(move |s| s.group == group)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VendorPackage {
    pub id: &'static str,
    pub tier: Tier,
    /// Also wipe its data when the extreme tier is requested.
    pub clear: bool,
}

#[derive(Debug)]
pub struct VendorCatalog {
    pub brand: &'static str,
    pub settings: &'static [CatalogSetting],
    pub packages: &'static [VendorPackage],
}

impl VendorCatalog {
    pub fn matches(&self, brand: &str) -> bool {
        brand.trim().eq_ignore_ascii_case(self.brand)
    }

    pub fn packages_for(&self, tier: Tier) -> impl Iterator<Item = &VendorPackage> {
        self.packages.iter().filter(move |p| p.tier <= tier)
    }
}

const fn vendor(
    namespace: Namespace,
    key: &'static str,
    values: TierValues,
    revert: RevertAction,
) -> CatalogSetting {
    setting(SettingGroup::BatterySaver, namespace, key, values, revert)
}

pub static SAMSUNG: VendorCatalog = VendorCatalog {
    brand: "samsung",
    settings: &[
        vendor(
            Namespace::System,
            "master_motion",
            TierValues::all("0"),
            RevertAction::Delete,
        ),
        vendor(
            Namespace::System,
            "motion_engine",
            TierValues::all("0"),
            RevertAction::Delete,
        ),
        vendor(
            Namespace::System,
            "mcf_continuity",
            TierValues::all("0"),
            RevertAction::Delete,
        ),
        vendor(
            Namespace::System,
            "adaptive_fast_charging",
            TierValues::all("1"),
            RevertAction::Put("1"),
        ),
        vendor(
            Namespace::System,
            "p_battery_charging_efficiency",
            TierValues::all("1"),
            RevertAction::Delete,
        ),
        vendor(
            Namespace::Global,
            "cached_apps_freezer",
            TierValues::all("enabled"),
            RevertAction::Put("device_default"),
        ),
        vendor(
            Namespace::Global,
            "sem_enhanced_cpu_responsiveness",
            TierValues::all("0"),
            RevertAction::Delete,
        ),
        vendor(
            Namespace::Global,
            "ram_expand_size",
            TierValues::all("0"),
            RevertAction::Delete,
        ),
        vendor(
            Namespace::Secure,
            "vibration_on",
            TierValues::all("0"),
            RevertAction::Put("1"),
        ),
        vendor(
            Namespace::Secure,
            "refresh_rate_mode",
            TierValues::all("0"),
            RevertAction::Delete,
        ),
    ],
    packages: &[
        VendorPackage {
            id: "com.samsung.android.game.gos",
            tier: Tier::Safe,
            clear: true,
        },
        VendorPackage {
            id: "com.samsung.android.game.gamelab",
            tier: Tier::Safe,
            clear: true,
        },
        VendorPackage {
            id: "com.samsung.android.bixby.agent",
            tier: Tier::Aggressive,
            clear: false,
        },
        VendorPackage {
            id: "com.samsung.android.visionintelligence",
            tier: Tier::Extreme,
            clear: false,
        },
    ],
};
