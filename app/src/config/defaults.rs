//! All setting definitions with their default values.

/// A single setting definition.
#[derive(Debug, Clone, Copy)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

pub const SERVER_PORT: &str = "SERVER_PORT";
pub const BIND_ADDRESS: &str = "BIND_ADDRESS";
pub const EMOTE_API_BASE_URL: &str = "EMOTE_API_BASE_URL";
pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
pub const CASE_SENSITIVE_DEFAULT: &str = "CASE_SENSITIVE_DEFAULT";

pub const SETTING_DEFS: &[SettingDef] = &[
    SettingDef {
        key: SERVER_PORT,
        default: "8080",
        description: "Port of the local web server",
    },
    SettingDef {
        key: BIND_ADDRESS,
        default: "127.0.0.1",
        description: "Interface the web server binds to",
    },
    SettingDef {
        key: EMOTE_API_BASE_URL,
        default: emote_client::client::DEFAULT_BASE_URL,
        description: "Root URL of the emote aggregation API",
    },
    SettingDef {
        key: REQUEST_TIMEOUT_SECS,
        default: "10",
        description: "Timeout for one emote API request, in seconds",
    },
    SettingDef {
        key: CASE_SENSITIVE_DEFAULT,
        default: "true",
        description: "Initial state of the case-sensitive matching toggle",
    },
];

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    SETTING_DEFS.iter().find(|d| d.key == key).map(|d| d.default)
}
