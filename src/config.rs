//! Runtime configuration
//!
//! Everything is read from environment variables with sensible defaults,
//! so the library can be driven from tests without any setup.

use anyhow::Result;
use std::env;
use std::path::PathBuf;

use crate::relations::DeletePolicy;

// Environment variable names
const ENV_DB_PATH: &str = "BIZCONSOLE_DB";
const ENV_LOG: &str = "BIZCONSOLE_LOG";
const ENV_DELETE_POLICY: &str = "BIZCONSOLE_DELETE_POLICY";
const ENV_PRIMARY_PRIORITY: &str = "BIZCONSOLE_PRIMARY_PRIORITY";
const ENV_DEFAULT_PRIORITY: &str = "BIZCONSOLE_DEFAULT_PRIORITY";

pub const DEFAULT_LOG_FILTER: &str = "info,bizconsole=debug";

/// Display priority applied to primary links when the caller gives none.
pub const PRIMARY_LINK_PRIORITY: u32 = 1;
/// Display priority applied to every other link when the caller gives none.
pub const DEFAULT_LINK_PRIORITY: u32 = 10;

/// Link priority convention: primary links sort ahead of the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityDefaults {
    pub primary: u32,
    pub other: u32,
}

impl Default for PriorityDefaults {
    fn default() -> Self {
        Self {
            primary: PRIMARY_LINK_PRIORITY,
            other: DEFAULT_LINK_PRIORITY,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite file backing the document store
    pub db_path: PathBuf,
    /// `tracing` filter directive
    pub log_filter: String,
    pub delete_policy: DeletePolicy,
    pub priorities: PriorityDefaults,
    /// Settings that were ignored while loading. Logged once a subscriber
    /// is installed.
    pub warnings: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let db_path = match env::var(ENV_DB_PATH) {
            Ok(p) if !p.trim().is_empty() => PathBuf::from(p),
            _ => Self::default_db_path()?,
        };

        let log_filter = env::var(ENV_LOG)
            .or_else(|_| env::var("RUST_LOG"))
            .unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

        let mut warnings = Vec::new();
        let delete_policy = env::var(ENV_DELETE_POLICY)
            .map(|raw| delete_policy_setting(&raw, &mut warnings))
            .unwrap_or_default();

        let priorities = PriorityDefaults {
            primary: priority_setting(
                ENV_PRIMARY_PRIORITY,
                env::var(ENV_PRIMARY_PRIORITY).ok(),
                PRIMARY_LINK_PRIORITY,
                &mut warnings,
            ),
            other: priority_setting(
                ENV_DEFAULT_PRIORITY,
                env::var(ENV_DEFAULT_PRIORITY).ok(),
                DEFAULT_LINK_PRIORITY,
                &mut warnings,
            ),
        };

        Ok(Self {
            db_path,
            log_filter,
            delete_policy,
            priorities,
            warnings,
        })
    }

    fn default_db_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join("bizconsole").join("console.db"))
    }
}

fn priority_setting(key: &str, raw: Option<String>, fallback: u32, warnings: &mut Vec<String>) -> u32 {
    let Some(raw) = raw else {
        return fallback;
    };
    parse_priority(&raw).unwrap_or_else(|| {
        warnings.push(format!(
            "Ignoring {}={:?}: not a non-negative integer, using {}",
            key, raw, fallback
        ));
        fallback
    })
}

fn delete_policy_setting(raw: &str, warnings: &mut Vec<String>) -> DeletePolicy {
    let policy = DeletePolicy::parse(raw);
    if policy.as_str() != raw.trim().to_lowercase() {
        warnings.push(format!(
            "Ignoring {}={:?}: expected orphan, cascade or reject",
            ENV_DELETE_POLICY, raw
        ));
    }
    policy
}

fn parse_priority(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_defaults() {
        let p = PriorityDefaults::default();
        assert_eq!(p.primary, 1);
        assert_eq!(p.other, 10);
    }

    #[test]
    fn test_parse_priority() {
        assert_eq!(parse_priority(" 3 "), Some(3));
        assert_eq!(parse_priority("-1"), None);
        assert_eq!(parse_priority("high"), None);
    }

    #[test]
    fn test_unknown_delete_policy_warns() {
        let mut warnings = Vec::new();
        assert_eq!(delete_policy_setting(" Cascade ", &mut warnings), DeletePolicy::Cascade);
        assert!(warnings.is_empty());
        assert_eq!(delete_policy_setting("purge", &mut warnings), DeletePolicy::Orphan);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_invalid_priority_falls_back_with_warning() {
        let mut warnings = Vec::new();
        assert_eq!(priority_setting("P", None, 10, &mut warnings), 10);
        assert_eq!(priority_setting("P", Some("4".into()), 10, &mut warnings), 4);
        assert!(warnings.is_empty());

        assert_eq!(priority_setting("P", Some("high".into()), 10, &mut warnings), 10);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("P=\"high\""));
    }
}
