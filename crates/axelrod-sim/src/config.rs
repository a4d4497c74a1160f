//! Configuration System
//!
//! Loads run parameters from culture.toml so runs can be tuned without
//! recompiling. Every section falls back to its defaults when omitted.

use axelrod_core::IsolatedPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::topology::TopologyKind;

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "culture.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub culture: CultureConfig,
    pub topology: TopologyConfig,
    pub output: OutputConfig,
}

/// Run length and bookkeeping intervals
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for the run's SmallRng
    pub seed: u64,
    /// Step budget
    pub max_steps: u64,
    /// Steps between fixed-point checks
    pub check_interval: u64,
    /// Steps between cluster samples and snapshots (0 disables them)
    pub snapshot_interval: u64,
    /// `resample`, `skip` or `fail`
    #[serde(with = "policy_name")]
    pub isolated_policy: IsolatedPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_steps: 1_000_000,
            check_interval: 1_000,
            snapshot_interval: 100_000,
            isolated_policy: IsolatedPolicy::Resample,
        }
    }
}

/// Reads and writes [`IsolatedPolicy`] by its lowercase name
mod policy_name {
    use axelrod_core::IsolatedPolicy;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(policy: &IsolatedPolicy, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(policy.as_str())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<IsolatedPolicy, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(D::Error::custom)
    }
}

/// Culture dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CultureConfig {
    pub features: usize,
    pub traits: u32,
}

impl Default for CultureConfig {
    fn default() -> Self {
        Self {
            features: 5,
            traits: 10,
        }
    }
}

/// Fixture topology the driver builds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TopologyConfig {
    pub kind: TopologyKind,
    /// Lattice columns
    pub width: usize,
    /// Lattice rows
    pub height: usize,
    /// Node count for ring and complete graphs
    pub nodes: usize,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            kind: TopologyKind::Lattice,
            width: 10,
            height: 10,
            nodes: 100,
        }
    }
}

/// Where and what the driver writes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    /// Write one JSON line per step to events.jsonl
    pub log_events: bool,
    /// Write snapshot files at every snapshot interval
    pub write_snapshots: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            log_events: false,
            write_snapshots: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path`, or use defaults if it cannot be read
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), "could not load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject settings the run cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_run()?;
        self.validate_topology()
    }

    /// Checks the culture dimensions and step bookkeeping
    pub fn validate_run(&self) -> Result<(), ConfigError> {
        if self.culture.features == 0 {
            return Err(ConfigError::Invalid("culture.features must be at least 1".into()));
        }
        if self.culture.traits == 0 {
            return Err(ConfigError::Invalid("culture.traits must be at least 1".into()));
        }
        if self.simulation.check_interval == 0 {
            return Err(ConfigError::Invalid(
                "simulation.check_interval must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Checks that the fixture topology has nodes
    pub fn validate_topology(&self) -> Result<(), ConfigError> {
        let empty = match self.topology.kind {
            TopologyKind::Lattice => self.topology.width == 0 || self.topology.height == 0,
            TopologyKind::Ring | TopologyKind::Complete => self.topology.nodes == 0,
        };
        if empty {
            return Err(ConfigError::Invalid(format!(
                "{} topology has no nodes",
                self.topology.kind.as_str()
            )));
        }
        Ok(())
    }
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.simulation.seed, 42);
        assert_eq!(config.culture.features, 5);
        assert_eq!(config.topology.kind, TopologyKind::Lattice);
        assert!(!config.output.log_events);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bundled_config_parses() {
        let config = Config::from_str(include_str!("../../../culture.toml")).unwrap();
        assert!(config.simulation.max_steps > 0);
        assert!(config.culture.traits > 0);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
            [culture]
            features = 3

            [topology]
            kind = "ring"
            nodes = 20
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.culture.features, 3);
        assert_eq!(config.culture.traits, 10);
        assert_eq!(config.topology.kind, TopologyKind::Ring);
        assert_eq!(config.topology.nodes, 20);
        assert_eq!(config.simulation.check_interval, 1_000);
    }

    #[test]
    fn test_policy_setting() {
        let config = Config::from_str("[simulation]\nisolated_policy = \"fail\"\n").unwrap();
        assert_eq!(config.simulation.isolated_policy, IsolatedPolicy::Fail);
        assert!(matches!(
            Config::from_str("[simulation]\nisolated_policy = \"maybe\"\n"),
            Err(ConfigError::Parse(_))
        ));

        let mut config = Config::default();
        config.simulation.isolated_policy = IsolatedPolicy::Skip;
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("isolated_policy = \"skip\""));
        assert_eq!(
            Config::from_str(&toml).unwrap().simulation.isolated_policy,
            IsolatedPolicy::Skip
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        for toml in [
            "[culture]\nfeatures = 0\n",
            "[culture]\ntraits = 0\n",
            "[simulation]\ncheck_interval = 0\n",
            "[topology]\nkind = \"lattice\"\nwidth = 0\n",
            "[topology]\nkind = \"complete\"\nnodes = 0\n",
        ] {
            assert!(
                matches!(Config::from_str(toml), Err(ConfigError::Invalid(_))),
                "accepted {:?}",
                toml
            );
        }
    }

    #[test]
    fn test_topology_checked_separately() {
        let mut config = Config::default();
        config.topology.kind = TopologyKind::Ring;
        config.topology.nodes = 0;

        assert!(config.validate_run().is_ok());
        assert!(matches!(config.validate_topology(), Err(ConfigError::Invalid(_))));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_to_toml_round_trips() {
        let mut config = Config::default();
        config.culture.traits = 3;
        let toml = config.to_toml().unwrap();

        assert!(toml.contains("[simulation]"));
        assert!(toml.contains("[culture]"));
        let parsed = Config::from_str(&toml).unwrap();
        assert_eq!(parsed.culture.traits, 3);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = Config::load_or_default("does/not/exist.toml");
        assert_eq!(config.simulation.seed, 42);
        assert!(matches!(
            Config::load("does/not/exist.toml"),
            Err(ConfigError::Io { .. })
        ));
    }
}
