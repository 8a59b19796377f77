//! Runtime configuration for the terminal binary, read from the environment.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::types::FRAME_MS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Seed for the piece RNG
    pub seed: u32,
    /// Loop period in milliseconds (at least 1)
    pub frame_ms: u64,
    /// Log file; when unset, log records go to stderr
    pub log_path: Option<String>,
}

impl RunConfig {
    /// Read `BLOCKFALL_SEED`, `BLOCKFALL_FRAME_MS` and `BLOCKFALL_LOG_PATH`.
    ///
    /// Missing or unparsable values fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Self {
        let seed = get("BLOCKFALL_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let frame_ms = get("BLOCKFALL_FRAME_MS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(FRAME_MS)
            .max(1);

        let log_path = get("BLOCKFALL_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            seed,
            frame_ms,
            log_path,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> RunConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RunConfig::from_vars(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]);
        assert_eq!(cfg.frame_ms, FRAME_MS);
        assert_eq!(cfg.log_path, None);
    }

    #[test]
    fn test_explicit_values() {
        let cfg = config(&[
            ("BLOCKFALL_SEED", "42"),
            ("BLOCKFALL_FRAME_MS", " 16 "),
            ("BLOCKFALL_LOG_PATH", "/tmp/blockfall.log"),
        ]);
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.frame_duration(), Duration::from_millis(16));
        assert_eq!(cfg.log_path.as_deref(), Some("/tmp/blockfall.log"));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let cfg = config(&[
            ("BLOCKFALL_FRAME_MS", "0"),
            ("BLOCKFALL_LOG_PATH", "   "),
        ]);
        assert_eq!(cfg.frame_ms, 1);
        assert_eq!(cfg.log_path, None);

        let cfg = config(&[("BLOCKFALL_FRAME_MS", "fast")]);
        assert_eq!(cfg.frame_ms, FRAME_MS);
    }

    #[test]
    fn test_from_env_does_not_panic() {
        let _config = RunConfig::from_env();
    }
}
