//! Service layer containing the profile engines and side-effect helpers.
//!
//! ## Service map
//! - `transport.rs` — `CommandTransport` boundary, adb implementation, fail-open execute.
//! - `applier.rs` — tier application in catalog order.
//! - `restriction.rs` — package listing parse + whitelist-gated background restriction.
//! - `whitelist.rs` — line-delimited whitelist store and package search.
//! - `vendor.rs` — brand-gated vendor profile apply/revert.
//! - `revert.rs` — full inverse of every tier plus restriction/vendor undo.
//! - `device.rs` — connection check, identity, status and background maintenance.
//! - `config.rs` — config file + flag merging.
//! - `storage.rs` — app directory + audit log.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Engines never abort on a failed device command; they count it and move on.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod applier;
pub mod config;
pub mod device;
pub mod output;
pub mod restriction;
pub mod revert;
pub mod storage;
pub mod transport;
pub mod vendor;
pub mod whitelist;
