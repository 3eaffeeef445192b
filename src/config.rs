use std::fs;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Engine configuration, loaded from `config/{env}.yaml`
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EngineConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    #[serde(default)]
    pub outbox: OutboxConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: "./logs".to_string(),
            log_file: "moneyflow.log".to_string(),
            use_json: false,
            rotation: "daily".to_string(),
            outbox: OutboxConfig::default(),
        }
    }
}

/// Outbox (post-commit notification dispatch) configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct OutboxConfig {
    #[serde(default)]
    pub dispatch: DispatchPolicy,
}

/// What to do when a post-commit notification delivery fails
///
/// Delivery never rolls back the committed mutation and never fails the
/// use case; the policy only controls how hard the engine tries before
/// dropping the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DispatchPolicy {
    /// Single attempt; a failure is logged and the event dropped
    #[default]
    BestEffort,
    /// Bounded retries; `attempts` is the total number of delivery
    /// attempts per event (minimum 1)
    Retry { attempts: u32 },
}

impl DispatchPolicy {
    /// Total delivery attempts per event under this policy
    pub fn max_attempts(&self) -> u32 {
        match self {
            DispatchPolicy::BestEffort => 1,
            DispatchPolicy::Retry { attempts } => (*attempts).max(1),
        }
    }
}

impl EngineConfig {
    /// Load configuration for the given environment name
    pub fn load(env: &str) -> anyhow::Result<Self> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config yaml: {}", config_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_best_effort() {
        assert_eq!(DispatchPolicy::default(), DispatchPolicy::BestEffort);
        assert_eq!(DispatchPolicy::BestEffort.max_attempts(), 1);
    }

    #[test]
    fn test_retry_attempts_floor_at_one() {
        assert_eq!(DispatchPolicy::Retry { attempts: 3 }.max_attempts(), 3);
        assert_eq!(DispatchPolicy::Retry { attempts: 0 }.max_attempts(), 1);
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
log_level: debug
log_dir: ./logs
log_file: engine.log
use_json: true
rotation: hourly
outbox:
  dispatch:
    mode: retry
    attempts: 5
"#;
        let config: EngineConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.log_level, "debug");
        assert!(config.use_json);
        assert_eq!(
            config.outbox.dispatch,
            DispatchPolicy::Retry { attempts: 5 }
        );
    }

    #[test]
    fn test_parse_policy_map_forms() {
        let policy: DispatchPolicy = serde_yaml::from_str("mode: best_effort").unwrap();
        assert_eq!(policy, DispatchPolicy::BestEffort);

        let policy: DispatchPolicy = serde_yaml::from_str("mode: retry\nattempts: 2").unwrap();
        assert_eq!(policy, DispatchPolicy::Retry { attempts: 2 });
    }

    #[test]
    fn test_outbox_defaults_when_missing() {
        let yaml = r#"
log_level: info
log_dir: ./logs
log_file: engine.log
use_json: false
rotation: daily
"#;
        let config: EngineConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.outbox.dispatch, DispatchPolicy::BestEffort);
    }
}
