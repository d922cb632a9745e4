use anyhow::{Context, Result, bail};
use clap::Parser;
use std::{env, str::FromStr};

use crate::models::layout::WEBSOCKET_PORT;

/// Default port for NMEA 0183 over UDP.
pub const DEFAULT_UDP_PORT: u16 = 10110;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub websocket_port: u16,
    pub websocket_log: bool,
    pub udp_port: u16,
    pub udp_target: Option<String>,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Web interface of the NMEA bridge")]
pub struct Args {
    /// Host to bind to (overrides NMEA_BRIDGE_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// HTTP port (overrides NMEA_BRIDGE_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Port of the websocket log stream (overrides NMEA_BRIDGE_WEBSOCKET_PORT)
    #[arg(long)]
    pub websocket_port: Option<u16>,

    /// Enable or disable the websocket log page (overrides NMEA_BRIDGE_WEBSOCKET_LOG)
    #[arg(long)]
    pub websocket_log: Option<bool>,

    /// UDP port NMEA sentences are received on (overrides NMEA_BRIDGE_UDP_PORT)
    #[arg(long)]
    pub udp_port: Option<u16>,

    /// `host:port` that sentences sent from the log page are forwarded to
    /// (overrides NMEA_BRIDGE_UDP_TARGET)
    #[arg(long)]
    pub udp_target: Option<String>,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig.
    pub fn from_env_and_args() -> Result<Self> {
        let args = Args::parse();
        Self::merge(args, |key| env_value(key, env::var(key)))
    }

    /// Merge CLI arguments over values looked up by `env`, falling back to
    /// built-in defaults.
    pub fn merge(args: Args, env: impl Fn(&str) -> Result<Option<String>>) -> Result<Self> {
        let env_host = env("NMEA_BRIDGE_HOST")?.unwrap_or_else(|| "0.0.0.0".into());
        let env_port = parse_env(&env, "NMEA_BRIDGE_PORT", 8080)?;
        let env_ws_port = parse_env(&env, "NMEA_BRIDGE_WEBSOCKET_PORT", WEBSOCKET_PORT)?;
        let env_ws_log = match env("NMEA_BRIDGE_WEBSOCKET_LOG")? {
            Some(value) => parse_bool(&value)
                .with_context(|| format!("parsing NMEA_BRIDGE_WEBSOCKET_LOG value `{}`", value))?,
            None => cfg!(feature = "websocket-log"),
        };
        let env_udp_port = parse_env(&env, "NMEA_BRIDGE_UDP_PORT", DEFAULT_UDP_PORT)?;
        let env_udp_target = env("NMEA_BRIDGE_UDP_TARGET")?.filter(|t| !t.trim().is_empty());

        let cfg = Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            websocket_port: args.websocket_port.unwrap_or(env_ws_port),
            websocket_log: args.websocket_log.unwrap_or(env_ws_log),
            udp_port: args.udp_port.unwrap_or(env_udp_port),
            udp_target: args.udp_target.or(env_udp_target),
        };

        if cfg.websocket_log && cfg.websocket_port == cfg.port {
            bail!(
                "websocket port {} collides with the HTTP port",
                cfg.websocket_port
            );
        }

        Ok(cfg)
    }

    pub fn udp_addr(&self) -> String {
        format!("{}:{}", self.host, self.udp_port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            websocket_port: WEBSOCKET_PORT,
            websocket_log: cfg!(feature = "websocket-log"),
            udp_port: DEFAULT_UDP_PORT,
            udp_target: None,
        }
    }
}

/// Interpret the result of reading `key` from the process environment.
fn env_value(key: &str, value: Result<String, env::VarError>) -> Result<Option<String>> {
    match value {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(err).with_context(|| format!("reading {}", key)),
    }
}

fn parse_env<T>(
    env: &impl Fn(&str) -> Result<Option<String>>,
    key: &str,
    default: T,
) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env(key)? {
        Some(value) => value
            .parse::<T>()
            .with_context(|| format!("parsing {} value `{}`", key, value)),
        None => Ok(default),
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got `{}`", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Result<Option<String>> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| Ok(map.get(key).cloned())
    }

    #[test]
    fn defaults_without_args_or_env() {
        let cfg = AppConfig::merge(Args::default(), env_of(&[])).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.websocket_port, 81);
        assert_eq!(cfg.udp_port, 10110);
    }

    #[test]
    fn env_overrides_defaults() {
        let cfg = AppConfig::merge(
            Args::default(),
            env_of(&[
                ("NMEA_BRIDGE_HOST", "127.0.0.1"),
                ("NMEA_BRIDGE_PORT", "9000"),
                ("NMEA_BRIDGE_WEBSOCKET_PORT", "9001"),
                ("NMEA_BRIDGE_WEBSOCKET_LOG", "off"),
                ("NMEA_BRIDGE_UDP_TARGET", "192.168.4.2:10110"),
            ]),
        )
        .unwrap();
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.websocket_port, 9001);
        assert!(!cfg.websocket_log);
        assert_eq!(cfg.udp_target.as_deref(), Some("192.168.4.2:10110"));
    }

    #[test]
    fn args_win_over_env() {
        let args = Args {
            port: Some(7000),
            websocket_log: Some(true),
            ..Args::default()
        };
        let cfg = AppConfig::merge(
            args,
            env_of(&[
                ("NMEA_BRIDGE_PORT", "9000"),
                ("NMEA_BRIDGE_WEBSOCKET_LOG", "false"),
            ]),
        )
        .unwrap();
        assert_eq!(cfg.port, 7000);
        assert!(cfg.websocket_log);
    }

    #[test]
    fn invalid_env_values_are_errors() {
        let err = AppConfig::merge(Args::default(), env_of(&[("NMEA_BRIDGE_PORT", "eighty")]))
            .unwrap_err();
        assert!(err.to_string().contains("NMEA_BRIDGE_PORT"));

        let err = AppConfig::merge(
            Args::default(),
            env_of(&[("NMEA_BRIDGE_WEBSOCKET_LOG", "maybe")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("NMEA_BRIDGE_WEBSOCKET_LOG"));
    }

    #[test]
    fn port_collision_is_rejected_only_with_log_enabled() {
        let args = Args {
            port: Some(81),
            websocket_log: Some(true),
            ..Args::default()
        };
        assert!(AppConfig::merge(args, env_of(&[])).is_err());

        let args = Args {
            port: Some(81),
            websocket_log: Some(false),
            ..Args::default()
        };
        assert!(AppConfig::merge(args, env_of(&[])).is_ok());
    }

    #[test]
    fn blank_udp_target_means_none() {
        let cfg =
            AppConfig::merge(Args::default(), env_of(&[("NMEA_BRIDGE_UDP_TARGET", "  ")])).unwrap();
        assert_eq!(cfg.udp_target, None);
    }

    #[test]
    fn non_unicode_env_value_is_an_error() {
        let raw = Err(env::VarError::NotUnicode(std::ffi::OsString::from("x")));
        let err = env_value("NMEA_BRIDGE_HOST", raw).unwrap_err();
        assert!(err.to_string().contains("reading NMEA_BRIDGE_HOST"));

        let err = AppConfig::merge(Args::default(), |key| {
            env_value(
                key,
                if key == "NMEA_BRIDGE_UDP_TARGET" {
                    Err(env::VarError::NotUnicode(std::ffi::OsString::from("x")))
                } else {
                    Err(env::VarError::NotPresent)
                },
            )
        })
        .unwrap_err();
        assert!(err.to_string().contains("NMEA_BRIDGE_UDP_TARGET"));
    }

    #[test]
    fn missing_env_value_is_unset() {
        assert_eq!(
            env_value("NMEA_BRIDGE_HOST", Err(env::VarError::NotPresent)).unwrap(),
            None
        );
        assert_eq!(
            env_value("NMEA_BRIDGE_HOST", Ok("10.0.0.1".into())).unwrap(),
            Some("10.0.0.1".to_string())
        );
    }
}
