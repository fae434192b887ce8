use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(
    name = "droidsave",
    version,
    about = "Tiered battery profiles for an adb-connected Android device"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        env = "DROIDSAVE_ADB",
        help = "Path to the adb executable (defaults to config or `adb` on PATH)"
    )]
    pub adb: Option<String>,
    #[arg(long, global = true, help = "Whitelist file (one package per line)")]
    pub whitelist: Option<String>,
    #[arg(long, global = true, help = "Config file (defaults to ~/.config/droidsave/config.toml)")]
    pub config: Option<String>,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Battery status and power-use summary.
    Status,
    /// Apply a profile tier.
    Apply {
        #[arg(value_enum)]
        tier: Tier,
    },
    /// Set the background restriction for all third-party apps.
    Restrict {
        #[arg(long, value_enum, default_value_t = RestrictionLevel::Restrict)]
        level: RestrictionLevel,
    },
    /// Packages exempt from background restriction.
    Whitelist {
        #[command(subcommand)]
        command: WhitelistCommands,
    },
    /// Apply the vendor profile for a tier when the device brand matches.
    Vendor {
        #[arg(value_enum)]
        tier: Tier,
    },
    /// Run background dexopt and trim caches.
    OptimizeBackground,
    /// Restore defaults for everything any tier may have set.
    Revert,
    /// Interactive menu (the default without a subcommand).
    Menu,
}

#[derive(Subcommand, Debug)]
pub enum WhitelistCommands {
    List,
    /// Add a package id, or search installed packages by partial name.
    Add {
        package: String,
        #[arg(long, help = "Pick the Nth search match when the name is partial")]
        pick: Option<usize>,
    },
    /// Remove by the number shown in `whitelist list`.
    Remove {
        index: String,
    },
    Search {
        query: String,
    },
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Safe,
    Aggressive,
    Extreme,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Safe, Tier::Aggressive, Tier::Extreme];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Safe => "safe",
            Tier::Aggressive => "aggressive",
            Tier::Extreme => "extreme",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum RestrictionLevel {
    #[value(name = "ignore")]
    #[serde(rename = "ignore")]
    Restrict,
    #[value(name = "allow")]
    #[serde(rename = "allow")]
    Allow,
}

impl RestrictionLevel {
    /// Mode for `cmd appops set <pkg> RUN_ANY_IN_BACKGROUND <mode>`.
    pub fn app_ops_mode(&self) -> &'static str {
        match self {
            RestrictionLevel::Restrict => "ignore",
            RestrictionLevel::Allow => "allow",
        }
    }

    pub fn standby_bucket(&self) -> &'static str {
        match self {
            RestrictionLevel::Restrict => "rare",
            RestrictionLevel::Allow => "active",
        }
    }
}
