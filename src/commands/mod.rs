//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `session.rs` — connected device + whitelist, one method per operation, audit trail.
//! - `runtime.rs` — one-shot subcommands and offline whitelist edits.
//! - `menu.rs` — numbered interactive menu over any reader/writer.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod menu;
pub mod runtime;
pub mod session;

pub use menu::Menu;
pub use runtime::{handle_runtime_commands, handle_whitelist_commands};
pub use session::Session;
