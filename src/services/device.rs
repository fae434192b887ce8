use crate::domain::constants::{PROP_BRAND, PROP_MODEL, PROP_OS_VERSION};
use crate::domain::models::{
    CommandTally, DeviceCommand, DeviceIdentity, MaintenanceReport, SessionError, StatusReport,
};
use crate::services::transport::{execute_all, query, CommandTransport};
use tracing::info;

pub fn require_device(transport: &mut dyn CommandTransport) -> Result<(), SessionError> {
    if transport.device_connected() {
        Ok(())
    } else {
        Err(SessionError::NoDevice)
    }
}

/// Read once per session; vendor gating uses the brand.
pub fn fetch_identity(transport: &mut dyn CommandTransport) -> DeviceIdentity {
    let identity = DeviceIdentity {
        brand: query(transport, &DeviceCommand::GetProp(PROP_BRAND)),
        model: query(transport, &DeviceCommand::GetProp(PROP_MODEL)),
        os_version: query(transport, &DeviceCommand::GetProp(PROP_OS_VERSION)),
    };
    info!(device = %identity, "connected");
    identity
}

const SUMMARY_MARKERS: [&str; 3] = ["Estimated power use", "Capacity:", "Computed drain:"];

/// Pull the power-use block out of `dumpsys batterystats --charged`: the
/// marker lines plus the per-consumer lines that follow them.
pub fn summarize_batterystats(output: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut in_summary = false;
    for line in output.lines() {
        if SUMMARY_MARKERS.iter().any(|m| line.contains(m)) {
            out.push(line.trim().to_string());
            in_summary = true;
        } else if in_summary && (line.contains(" mAh") || line.contains(':')) {
            // A top-level line without a charge figure ends the block.
            if !line.starts_with("  ") && !line.contains(" mAh") {
                in_summary = false;
                continue;
            }
            out.push(line.trim().to_string());
        }
    }
    out
}

pub fn check_status(
    transport: &mut dyn CommandTransport,
    identity: &DeviceIdentity,
) -> StatusReport {
    let battery = query(
        transport,
        &DeviceCommand::Dumpsys {
            service: "battery",
            args: &[],
        },
    );
    let stats = query(
        transport,
        &DeviceCommand::Dumpsys {
            service: "batterystats",
            args: &["--charged"],
        },
    );
    StatusReport {
        device: identity.clone(),
        battery,
        power_summary: summarize_batterystats(&stats),
    }
}

/// Compile pending apps in the background and drop every app cache.
pub fn run_background_optimization(transport: &mut dyn CommandTransport) -> MaintenanceReport {
    let mut commands = CommandTally::default();
    execute_all(
        transport,
        &[DeviceCommand::BackgroundDexopt, DeviceCommand::TrimCaches],
        &mut commands,
    );
    info!(failed = commands.failed, "background optimization finished");
    MaintenanceReport { commands }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::transport::fake::FakeDevice;

    #[test]
    fn offline_device_is_an_error() {
        let mut device = FakeDevice::new("google");
        device.offline = true;
        assert!(matches!(
            require_device(&mut device),
            Err(SessionError::NoDevice)
        ));
    }

    #[test]
    fn identity_reads_three_props() {
        let mut device = FakeDevice::new("samsung");
        let identity = fetch_identity(&mut device);
        assert_eq!(identity.brand, "samsung");
        assert_eq!(identity.to_string(), "samsung Test Model (Android 14)");
        assert_eq!(device.issued.len(), 3);
    }

    #[test]
    fn batterystats_summary_keeps_power_block_only() {
        let stats = "\
Statistics since last charge:
  System starts: 0, currently on battery: true
  Estimated power use (mAh):
    Capacity: 4000, Computed drain: 512, actual drain: 480-520
    Screen: 120 mAh
    Uid u0a123: 80.5 mAh
Daily stats:
  Current start time: 2024-01-01";
        assert_eq!(
            summarize_batterystats(stats),
            vec![
                "Estimated power use (mAh):",
                "Capacity: 4000, Computed drain: 512, actual drain: 480-520",
                "Screen: 120 mAh",
                "Uid u0a123: 80.5 mAh",
            ]
        );
    }

    #[test]
    fn status_collects_battery_dump() {
        let mut device = FakeDevice::new("google");
        device.battery = "level: 80".to_string();
        let report = check_status(&mut device, &DeviceIdentity::default());
        assert_eq!(report.battery, "level: 80");
        assert!(report.power_summary.is_empty());
        assert_eq!(
            device.issued,
            vec!["dumpsys battery", "dumpsys batterystats --charged"]
        );
    }

    #[test]
    fn background_optimization_runs_dexopt_then_trim() {
        let mut device = FakeDevice::new("google");
        let report = run_background_optimization(&mut device);
        assert_eq!(report.commands.issued, 2);
        assert_eq!(
            device.issued,
            vec!["cmd package bg-dexopt-job", "pm trim-caches 999G"]
        );
    }
}
