use crate::catalog::SAMSUNG;
use crate::cli::{RestrictionLevel, Tier};
use crate::domain::models::{
    ApplyReport, DeviceIdentity, MaintenanceReport, RestrictReport, RevertReport, SessionError,
    StatusReport, VendorReport,
};
use crate::services::applier::apply_tier;
use crate::services::device::{
    check_status, fetch_identity, require_device, run_background_optimization,
};
use crate::services::restriction::{apply_restriction, list_third_party_packages};
use crate::services::revert::revert_all;
use crate::services::storage::audit;
use crate::services::transport::CommandTransport;
use crate::services::vendor::apply_vendor;
use crate::services::whitelist::WhitelistStore;
use serde_json::json;
use std::path::PathBuf;
use tracing::warn;

/// A connected device plus the whitelist every operation consults.
///
/// Identity is read once at connect time; the whitelist file is re-read by
/// each operation that needs it.
pub struct Session<'t> {
    transport: &'t mut dyn CommandTransport,
    pub identity: DeviceIdentity,
    pub whitelist: WhitelistStore,
    audit_log: Option<PathBuf>,
}

impl<'t> Session<'t> {
    pub fn connect(
        transport: &'t mut dyn CommandTransport,
        whitelist: WhitelistStore,
        audit_log: Option<PathBuf>,
    ) -> Result<Self, SessionError> {
        require_device(&mut *transport)?;
        let identity = fetch_identity(&mut *transport);
        Ok(Self {
            transport,
            identity,
            whitelist,
            audit_log,
        })
    }

    fn audit(&self, action: &str, data: serde_json::Value) {
        audit(self.audit_log.as_deref(), action, data);
    }

    pub fn status(&mut self) -> StatusReport {
        check_status(&mut *self.transport, &self.identity)
    }

    pub fn apply(&mut self, tier: Tier) -> ApplyReport {
        let report = apply_tier(&mut *self.transport, tier);
        self.audit("apply", json!({ "tier": tier, "commands": report.commands }));
        report
    }

    pub fn restrict(&mut self, level: RestrictionLevel) -> anyhow::Result<RestrictReport> {
        let whitelist = self.whitelist.load()?;
        let report = apply_restriction(&mut *self.transport, &whitelist, level);
        self.audit(
            "restrict",
            json!({ "level": level, "packages": report.packages, "whitelisted": report.whitelisted }),
        );
        Ok(report)
    }

    pub fn vendor(&mut self, tier: Tier) -> VendorReport {
        let report = apply_vendor(&mut *self.transport, &SAMSUNG, &self.identity, tier);
        self.audit(
            "vendor",
            json!({ "tier": tier, "applied": report.applied, "brand": report.brand }),
        );
        report
    }

    pub fn optimize_background(&mut self) -> MaintenanceReport {
        let report = run_background_optimization(&mut *self.transport);
        self.audit("optimize-background", json!({ "commands": report.commands }));
        report
    }

    /// Revert never stops on an unreadable whitelist; it restores every
    /// package to allow either way.
    pub fn revert(&mut self) -> RevertReport {
        let whitelist = self.whitelist.load().unwrap_or_else(|err| {
            warn!(path = %self.whitelist.path().display(), error = %err, "whitelist unreadable");
            vec![]
        });
        let report = revert_all(&mut *self.transport, &self.identity, &whitelist, &SAMSUNG);
        self.audit(
            "revert",
            json!({ "settings": report.settings, "packages": report.restriction.packages }),
        );
        report
    }

    pub fn installed_packages(&mut self) -> Vec<String> {
        list_third_party_packages(&mut *self.transport)
    }
}
