use crate::domain::models::{
    ApplyReport, ErrorBody, JsonError, JsonOut, MaintenanceReport, RestrictReport, RevertReport,
    StatusReport, VendorReport,
};
use serde::Serialize;

pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}

pub fn print_error(json: bool, code: &'static str, message: String) {
    if json {
        let body = JsonError {
            ok: false,
            error: ErrorBody { code, message },
        };
        match serde_json::to_string_pretty(&body) {
            Ok(s) => println!("{}", s),
            Err(_) => eprintln!("error: {}", body.error.message),
        }
    } else {
        eprintln!("error: {}", message);
    }
}

fn failures(failed: usize) -> String {
    if failed == 0 {
        String::new()
    } else {
        format!(" ({} failed)", failed)
    }
}

pub fn apply_line(r: &ApplyReport) -> String {
    format!(
        "applied {} profile: {} settings, {} commands{}",
        r.tier.as_str(),
        r.assertions,
        r.commands.issued,
        failures(r.commands.failed)
    )
}

pub fn restrict_line(r: &RestrictReport) -> String {
    if r.packages == 0 {
        return "no third-party packages found; nothing changed".to_string();
    }
    let mut lines: Vec<String> = r
        .whitelisted
        .iter()
        .map(|p| format!("  whitelisted, kept allowed: {}", p))
        .collect();
    lines.push(format!(
        "background level '{}' set for {} packages ({} whitelisted){}",
        r.level.app_ops_mode(),
        r.managed.len(),
        r.whitelisted.len(),
        failures(r.commands.failed)
    ));
    lines.join("\n")
}

pub fn vendor_line(r: &VendorReport) -> String {
    if !r.applied {
        return r
            .reason
            .clone()
            .unwrap_or_else(|| format!("device is not {}", r.vendor));
    }
    format!(
        "{} profile: {} commands, packages: {}{}",
        r.vendor,
        r.commands.issued,
        if r.packages.is_empty() {
            "none".to_string()
        } else {
            r.packages.join(", ")
        },
        failures(r.commands.failed)
    )
}

pub fn revert_line(r: &RevertReport) -> String {
    [
        format!(
            "settings reset: {} commands{}",
            r.settings.issued,
            failures(r.settings.failed)
        ),
        restrict_line(&r.restriction),
        vendor_line(&r.vendor),
        "revert complete".to_string(),
    ]
    .join("\n")
}

pub fn status_line(r: &StatusReport) -> String {
    let mut out = format!("device: {}\n\n--- Battery Status ---\n{}", r.device, r.battery);
    out.push_str("\n\n--- Power Consumption Summary (Since Charged) ---");
    if r.power_summary.is_empty() {
        out.push_str("\n(no summary available)");
    }
    for line in &r.power_summary {
        out.push('\n');
        out.push_str(line);
    }
    out
}

pub fn maintenance_line(r: &MaintenanceReport) -> String {
    format!(
        "background optimization: {} commands{}",
        r.commands.issued,
        failures(r.commands.failed)
    )
}
