//! Shared data model layer (structs/constants only).
//!
//! ## Purpose
//! - Keep device command, assertion and report structs in one place.
//! - Avoid cyclic imports between the engines in `services/*`.
//! - Make JSON output schema changes explicit and reviewable.
//!
//! ## Files
//! - `models.rs` — assertions, device commands, identity, report structs.
//! - `constants.rs` — stable constants (config paths, getprop keys, doze domain).
//!
//! ## Rule of thumb
//! Domain types should be data-only: no device or filesystem side effects.
//! `DeviceCommand::args` is the only place the device shell wire form is built.

pub mod constants;
pub mod models;
