//! Setting value validation.

use std::net::IpAddr;

use super::defaults::{
    BIND_ADDRESS, CASE_SENSITIVE_DEFAULT, EMOTE_API_BASE_URL, REQUEST_TIMEOUT_SECS, SERVER_PORT,
};

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        SERVER_PORT => validate_int_range(value, 1, 65535)?,
        BIND_ADDRESS => {
            value
                .parse::<IpAddr>()
                .map_err(|_| "must be an IPv4 or IPv6 address")?;
        }
        EMOTE_API_BASE_URL => {
            if !value.starts_with("http://") && !value.starts_with("https://") {
                return Err("must start with http:// or https://".into());
            }
        }
        REQUEST_TIMEOUT_SECS => validate_int_range(value, 1, 120)?,
        CASE_SENSITIVE_DEFAULT => {
            if value != "true" && value != "false" {
                return Err("must be 'true' or 'false'".into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i64, max: i64) -> Result<(), String> {
    let v: i64 = value.parse().map_err(|_| "must be an integer")?;
    if !(min..=max).contains(&v) {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}
