use crate::domain::models::{CommandTally, DeviceCommand};
use shell_escape::unix::escape;
use std::borrow::Cow;
use std::process::Command;
use tracing::{debug, warn};

#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("device command failed: {0}")]
    Failed(String),
}

/// One connected device accepting shell commands. Calls block until the
/// device answers; nothing is retried.
pub trait CommandTransport {
    /// Run `command` on the device and return its trimmed stdout.
    fn shell(&mut self, command: &DeviceCommand) -> Result<String, TransportError>;

    fn device_connected(&mut self) -> bool;
}

pub struct AdbTransport {
    adb: String,
}

impl AdbTransport {
    pub fn new(adb: impl Into<String>) -> Self {
        Self { adb: adb.into() }
    }

    fn run(&self, args: &[String]) -> Result<String, TransportError> {
        let out = Command::new(&self.adb)
            .args(args)
            .output()
            .map_err(|source| TransportError::Spawn {
                program: self.adb.clone(),
                source,
            })?;
        let stdout = String::from_utf8_lossy(&out.stdout).trim().to_string();
        if !out.status.success() && stdout.is_empty() {
            let stderr = String::from_utf8_lossy(&out.stderr).trim().to_string();
            return Err(TransportError::Failed(if stderr.is_empty() {
                out.status.to_string()
            } else {
                stderr
            }));
        }
        Ok(stdout)
    }
}

/// `adb shell` joins argv with spaces and hands it to the device `sh`,
/// so each argument is quoted here and nowhere else.
pub fn shell_args(command: &DeviceCommand) -> Vec<String> {
    let mut args = vec!["shell".to_string()];
    args.extend(
        command
            .args()
            .iter()
            .map(|a| escape(Cow::Borrowed(a.as_str())).into_owned()),
    );
    args
}

impl CommandTransport for AdbTransport {
    fn shell(&mut self, command: &DeviceCommand) -> Result<String, TransportError> {
        self.run(&shell_args(command))
    }

    fn device_connected(&mut self) -> bool {
        match self.run(&["devices".to_string()]) {
            Ok(out) => has_ready_device(&out),
            Err(err) => {
                warn!(error = %err, "adb devices failed");
                false
            }
        }
    }
}

/// True when `adb devices` lists at least one device in the `device` state.
pub fn has_ready_device(devices_output: &str) -> bool {
    devices_output
        .lines()
        .filter_map(|l| l.split('\t').nth(1))
        .any(|state| state.trim() == "device")
}

/// Issue one command, counting it. Failures are logged and read as empty output.
pub fn execute(
    transport: &mut dyn CommandTransport,
    command: &DeviceCommand,
    tally: &mut CommandTally,
) -> String {
    tally.issued += 1;
    debug!(%command, "device command");
    match transport.shell(command) {
        Ok(out) => {
            if !out.is_empty() {
                debug!(%command, output = %out, "device output");
            }
            out
        }
        Err(err) => {
            tally.failed += 1;
            warn!(%command, error = %err, "device command failed; continuing");
            String::new()
        }
    }
}

pub fn execute_all<'a>(
    transport: &mut dyn CommandTransport,
    commands: impl IntoIterator<Item = &'a DeviceCommand>,
    tally: &mut CommandTally,
) {
    for command in commands {
        execute(transport, command, tally);
    }
}

/// Read-only query; a failure is just empty output.
pub fn query(transport: &mut dyn CommandTransport, command: &DeviceCommand) -> String {
    execute(transport, command, &mut CommandTally::default())
}

#[cfg(test)]
pub mod fake {
    use super::{CommandTransport, TransportError};
    use crate::domain::constants::{PROP_BRAND, PROP_MODEL, PROP_OS_VERSION};
    use crate::domain::models::DeviceCommand;
    use std::collections::{BTreeMap, BTreeSet};

    /// In-memory device: records every command and keeps the settings and
    /// package state those commands imply.
    #[derive(Default)]
    pub struct FakeDevice {
        pub brand: String,
        pub packages: Vec<String>,
        pub battery: String,
        pub batterystats: String,
        pub issued: Vec<String>,
        pub settings: BTreeMap<String, String>,
        pub disabled: BTreeSet<String>,
        pub fail_containing: Vec<String>,
        pub offline: bool,
    }

    impl FakeDevice {
        pub fn new(brand: &str) -> Self {
            Self {
                brand: brand.to_string(),
                ..Self::default()
            }
        }

        pub fn with_packages(mut self, packages: &[&str]) -> Self {
            self.packages = packages.iter().map(|p| p.to_string()).collect();
            self
        }

        pub fn setting(&self, namespace: &str, key: &str) -> Option<&str> {
            self.settings
                .get(&format!("{namespace} {key}"))
                .map(String::as_str)
        }

        pub fn issued_for(&self, package: &str) -> Vec<&str> {
            self.issued
                .iter()
                .filter(|c| c.split(' ').any(|part| part == package))
                .map(String::as_str)
                .collect()
        }
    }

    impl CommandTransport for FakeDevice {
        fn shell(&mut self, command: &DeviceCommand) -> Result<String, TransportError> {
            let line = command.to_string();
            self.issued.push(line.clone());
            if self.fail_containing.iter().any(|f| line.contains(f.as_str())) {
                return Err(TransportError::Failed(format!("injected failure: {line}")));
            }
            let out = match command {
                DeviceCommand::Put(a) => {
                    self.settings
                        .insert(format!("{} {}", a.namespace, a.key), a.value.to_string());
                    String::new()
                }
                DeviceCommand::Delete { namespace, key } => {
                    self.settings.remove(&format!("{namespace} {key}"));
                    String::new()
                }
                DeviceCommand::GetProp(prop) => match *prop {
                    PROP_BRAND => self.brand.clone(),
                    PROP_MODEL => "Test Model".to_string(),
                    PROP_OS_VERSION => "14".to_string(),
                    _ => String::new(),
                },
                DeviceCommand::ListPackages { .. } => self
                    .packages
                    .iter()
                    .map(|p| format!("package:{p}"))
                    .collect::<Vec<_>>()
                    .join("\n"),
                DeviceCommand::DisablePackage(p) => {
                    self.disabled.insert(p.clone());
                    String::new()
                }
                DeviceCommand::EnablePackage(p) => {
                    self.disabled.remove(p);
                    String::new()
                }
                DeviceCommand::Dumpsys { service, args } => match (*service, args.first()) {
                    ("battery", _) => self.battery.clone(),
                    ("batterystats", _) => self.batterystats.clone(),
                    _ => String::new(),
                },
                _ => String::new(),
            };
            Ok(out)
        }

        fn device_connected(&mut self) -> bool {
            !self.offline
        }
    }
}
