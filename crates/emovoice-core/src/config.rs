//! Server configuration loaded from the environment.
//!
//! Resolved once at process startup and read-only afterwards. The disabled
//! flag forces all speech production into the client when the deployment has
//! no audio device (hosted environments, production mode).
//!
//! | Env | Default | Description |
//! |-----|---------|-------------|
//! | DISABLE_SERVER_TTS | unset | `1`/`true` disables server-side speech. |
//! | RENDER | unset | `true` (set by the Render platform) disables server-side speech. |
//! | EMOVOICE_ENV / NODE_ENV | unset | `production` disables server-side speech. |
//! | PORT / EMOVOICE_PORT | 3000 | Listen port. |
//! | EMOVOICE_TTS_TIMEOUT_SECS | 30 | Bound on one external synthesis call. |

use serde::Serialize;

/// Process-wide configuration, fixed at startup.
#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    /// When true, the speak step is a no-op and clients synthesize locally.
    #[serde(rename = "serverTTSDisabled")]
    pub server_tts_disabled: bool,
    #[serde(skip)]
    pub port: u16,
    #[serde(skip)]
    pub tts_timeout_secs: u64,
}

impl ServerConfig {
    /// Load from environment. Unset or invalid values fall back to defaults.
    pub fn from_env() -> Self {
        let disabled = env_flag("DISABLE_SERVER_TTS")
            || env_flag("RENDER")
            || env_is("EMOVOICE_ENV", "production")
            || env_is("NODE_ENV", "production");
        Self {
            server_tts_disabled: disabled,
            port: env_u16("PORT").or_else(|| env_u16("EMOVOICE_PORT")).unwrap_or(3000),
            tts_timeout_secs: env_u64("EMOVOICE_TTS_TIMEOUT_SECS").unwrap_or(30),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_tts_disabled: false,
            port: 3000,
            tts_timeout_secs: 30,
        }
    }
}

fn env_flag(name: &str) -> bool {
    match std::env::var(name) {
        Ok(v) => {
            let v = v.trim();
            v == "1" || v.eq_ignore_ascii_case("true")
        }
        Err(_) => false,
    }
}

fn env_is(name: &str, expected: &str) -> bool {
    match std::env::var(name) {
        Ok(v) => v.trim().eq_ignore_ascii_case(expected),
        Err(_) => false,
    }
}

fn env_u16(name: &str) -> Option<u16> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_enabled_on_port_3000() {
        let config = ServerConfig::default();
        assert!(!config.server_tts_disabled);
        assert_eq!(config.port, 3000);
        assert_eq!(config.tts_timeout_secs, 30);
    }

    #[test]
    fn config_serializes_only_the_public_flag() {
        let config = ServerConfig::default();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json, serde_json::json!({ "serverTTSDisabled": false }));
    }
}
