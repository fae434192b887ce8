use crate::cli::{RestrictionLevel, Tier};
use crate::domain::constants::{DEVICE_IDLE_DOMAIN, TRIM_CACHES_TARGET};
use serde::Serialize;
use std::fmt;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct JsonError {
    pub ok: bool,
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum InputError {
    #[error("invalid package identifier: {0:?}")]
    InvalidPackage(String),
    #[error("no installed package matches {0:?}")]
    NoMatch(String),
    #[error("{count} packages match {query:?}; pass --pick <n> to choose one")]
    Ambiguous { query: String, count: usize },
    #[error("pick {pick} is out of range (1..={count})")]
    PickOutOfRange { pick: usize, count: usize },
}

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("no device connected via adb")]
    NoDevice,
}

/// Settings grouping a key lives in. `DeviceConfig` carries its domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Namespace {
    Global,
    System,
    Secure,
    DeviceConfig(&'static str),
}

impl Namespace {
    pub const DEVICE_IDLE: Namespace = Namespace::DeviceConfig(DEVICE_IDLE_DOMAIN);
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Namespace::Global => f.write_str("global"),
            Namespace::System => f.write_str("system"),
            Namespace::Secure => f.write_str("secure"),
            Namespace::DeviceConfig(domain) => f.write_str(domain),
        }
    }
}

/// Absolute key/value write. Never a delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingAssertion {
    pub namespace: Namespace,
    pub key: &'static str,
    pub value: &'static str,
}

/// Everything the engines send to the device. Rendered to argv by [`DeviceCommand::args`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCommand {
    Put(SettingAssertion),
    Delete {
        namespace: Namespace,
        key: &'static str,
    },
    Dumpsys {
        service: &'static str,
        args: &'static [&'static str],
    },
    ListPackages {
        third_party: bool,
    },
    DisablePackage(String),
    EnablePackage(String),
    ClearPackage(String),
    RunInBackground {
        package: String,
        level: RestrictionLevel,
    },
    StandbyBucket {
        package: String,
        level: RestrictionLevel,
    },
    GetProp(&'static str),
    BackgroundDexopt,
    TrimCaches,
}

impl DeviceCommand {
    pub fn args(&self) -> Vec<String> {
        fn owned(parts: &[&str]) -> Vec<String> {
            parts.iter().map(|p| p.to_string()).collect()
        }

        match self {
            DeviceCommand::Put(a) => match a.namespace {
                Namespace::DeviceConfig(domain) => {
                    owned(&["device_config", "put", domain, a.key, a.value])
                }
                ns => {
                    let ns = ns.to_string();
                    owned(&["settings", "put", ns.as_str(), a.key, a.value])
                }
            },
            DeviceCommand::Delete { namespace, key } => match *namespace {
                Namespace::DeviceConfig(domain) => {
                    owned(&["device_config", "delete", domain, *key])
                }
                ns => {
                    let ns = ns.to_string();
                    owned(&["settings", "delete", ns.as_str(), *key])
                }
            },
            DeviceCommand::Dumpsys { service, args } => {
                let mut out = owned(&["dumpsys", *service]);
                out.extend(args.iter().map(|a| a.to_string()));
                out
            }
            DeviceCommand::ListPackages { third_party } => {
                let mut out = owned(&["pm", "list", "packages"]);
                if *third_party {
                    out.push("-3".to_string());
                }
                out
            }
            DeviceCommand::DisablePackage(p) => owned(&["pm", "disable-user", "--user", "0", p.as_str()]),
            DeviceCommand::EnablePackage(p) => owned(&["pm", "enable", "--user", "0", p.as_str()]),
            DeviceCommand::ClearPackage(p) => owned(&["pm", "clear", "--user", "0", p.as_str()]),
            DeviceCommand::RunInBackground { package, level } => owned(&[
                "cmd",
                "appops",
                "set",
                package.as_str(),
                "RUN_ANY_IN_BACKGROUND",
                level.app_ops_mode(),
            ]),
            DeviceCommand::StandbyBucket { package, level } => owned(&[
                "am",
                "set-standby-bucket",
                package.as_str(),
                level.standby_bucket(),
            ]),
            DeviceCommand::GetProp(prop) => owned(&["getprop", *prop]),
            DeviceCommand::BackgroundDexopt => owned(&["cmd", "package", "bg-dexopt-job"]),
            DeviceCommand::TrimCaches => owned(&["pm", "trim-caches", TRIM_CACHES_TARGET]),
        }
    }
}

impl fmt::Display for DeviceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.args().join(" "))
    }
}

/// Reverse-domain package name: letters, digits, `_` and `.`, starting with a letter.
pub fn validate_package_id(raw: &str) -> Result<String, InputError> {
    let id = raw.trim();
    let starts_ok = id.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    let chars_ok = id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
    if starts_ok && chars_ok && !id.ends_with('.') && !id.contains("..") {
        Ok(id.to_string())
    } else {
        Err(InputError::InvalidPackage(raw.to_string()))
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
pub struct DeviceIdentity {
    pub brand: String,
    pub model: String,
    pub os_version: String,
}

impl fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} (Android {})", self.brand, self.model, self.os_version)
    }
}

/// Commands sent vs. commands the transport reported as failed.
#[derive(Debug, Clone, Copy, Serialize, Default, PartialEq, Eq)]
pub struct CommandTally {
    pub issued: usize,
    pub failed: usize,
}

#[derive(Debug, Serialize)]
pub struct ApplyReport {
    pub tier: Tier,
    pub assertions: usize,
    pub commands: CommandTally,
}

#[derive(Debug, Serialize)]
pub struct RestrictReport {
    pub level: RestrictionLevel,
    pub packages: usize,
    pub whitelisted: Vec<String>,
    pub managed: Vec<String>,
    pub commands: CommandTally,
}

#[derive(Debug, Serialize)]
pub struct VendorReport {
    pub brand: String,
    pub vendor: &'static str,
    pub applied: bool,
    pub reason: Option<String>,
    pub packages: Vec<String>,
    pub commands: CommandTally,
}

#[derive(Debug, Serialize)]
pub struct RevertReport {
    pub settings: CommandTally,
    pub restriction: RestrictReport,
    pub vendor: VendorReport,
}

#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub device: DeviceIdentity,
    pub battery: String,
    pub power_summary: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MaintenanceReport {
    pub commands: CommandTally,
}

#[derive(Debug, Serialize)]
pub struct WhitelistEntry {
    pub index: usize,
    pub package: String,
}

#[derive(Debug, Serialize)]
pub struct WhitelistChange {
    pub action: &'static str,
    pub status: &'static str,
    pub package: Option<String>,
    pub whitelist: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_commands_render_namespace_and_domain() {
        let global = DeviceCommand::Put(SettingAssertion {
            namespace: Namespace::Global,
            key: "low_power",
            value: "1",
        });
        assert_eq!(global.to_string(), "settings put global low_power 1");

        let idle = DeviceCommand::Delete {
            namespace: Namespace::DEVICE_IDLE,
            key: "inactive_to",
        };
        assert_eq!(idle.to_string(), "device_config delete device_idle inactive_to");
    }

    #[test]
    fn restriction_pair_renders_mode_and_bucket() {
        let run = DeviceCommand::RunInBackground {
            package: "com.a".to_string(),
            level: RestrictionLevel::Restrict,
        };
        let bucket = DeviceCommand::StandbyBucket {
            package: "com.a".to_string(),
            level: RestrictionLevel::Allow,
        };
        assert_eq!(run.to_string(), "cmd appops set com.a RUN_ANY_IN_BACKGROUND ignore");
        assert_eq!(bucket.to_string(), "am set-standby-bucket com.a active");
    }

    #[test]
    fn package_ids_reject_shell_metacharacters() {
        assert_eq!(validate_package_id(" com.example.app ").as_deref(), Ok("com.example.app"));
        assert!(validate_package_id("com.x; reboot").is_err());
        assert!(validate_package_id("$(id)").is_err());
        assert!(validate_package_id("1com.x").is_err());
        assert!(validate_package_id("com..x").is_err());
        assert!(validate_package_id("").is_err());
    }
}
