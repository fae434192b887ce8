pub const APP_DIR: &str = ".config/droidsave";
pub const WHITELIST_FILE: &str = "whitelist.txt";
pub const CONFIG_FILE: &str = "config.toml";
pub const AUDIT_FILE: &str = "audit.jsonl";

pub const DEFAULT_ADB: &str = "adb";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

pub const PROP_BRAND: &str = "ro.product.brand";
pub const PROP_MODEL: &str = "ro.product.model";
pub const PROP_OS_VERSION: &str = "ro.build.version.release";

pub const DEVICE_IDLE_DOMAIN: &str = "device_idle";

/// `pm trim-caches` asks for this much free space, which frees every cache.
pub const TRIM_CACHES_TARGET: &str = "999G";
