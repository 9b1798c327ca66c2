use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::adapters::ADAPTER_NAMES;
use crate::error::ConfigError;

pub const CONFIG_FILE: &str = ".codebrowser.toml";

/// codebrowser configuration (loaded from .codebrowser.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodebrowserConfig {
    #[serde(default)]
    pub adapters: AdaptersConfig,

    #[serde(default)]
    pub source: SourceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AdaptersConfig {
    /// Adapters to enable (empty = all)
    #[serde(default)]
    pub enable: Vec<String>,

    /// Adapters to disable
    #[serde(default)]
    pub disable: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SourceConfig {
    /// Glob patterns to leave out when walking the source tree
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl CodebrowserConfig {
    /// Try to load .codebrowser.toml from the given directory or its parents
    pub fn load(start: &Path) -> Option<Self> {
        let config_path = find_config_file(start)?;
        debug!("Found config: {}", config_path.display());

        match std::fs::read_to_string(&config_path) {
            Ok(content) => match toml::from_str::<CodebrowserConfig>(&content) {
                Ok(config) => {
                    info!("Loaded config from {}", config_path.display());
                    Some(config)
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", config_path.display(), e);
                    None
                }
            },
            Err(e) => {
                debug!("Could not read {}: {}", config_path.display(), e);
                None
            }
        }
    }

    /// Adapter identifiers for this run. Names given on the command line win
    /// over `enable`; `disable` always applies. Every name must be known.
    pub fn adapter_names(&self, requested: Option<&str>) -> Result<Vec<String>, ConfigError> {
        let check = |name: &str| -> Result<String, ConfigError> {
            let name = name.trim().to_lowercase();
            if ADAPTER_NAMES.contains(&name.as_str()) {
                Ok(name)
            } else {
                Err(ConfigError::UnknownAdapter(name))
            }
        };

        let base: Vec<String> = match requested {
            Some(list) => list
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(check)
                .collect::<Result<_, _>>()?,
            None if !self.adapters.enable.is_empty() => self
                .adapters
                .enable
                .iter()
                .map(|s| check(s.as_str()))
                .collect::<Result<_, _>>()?,
            None => ADAPTER_NAMES.iter().map(|s| s.to_string()).collect(),
        };

        let disabled: Vec<String> = self
            .adapters
            .disable
            .iter()
            .map(|s| check(s.as_str()))
            .collect::<Result<_, _>>()?;

        Ok(base.into_iter().filter(|n| !disabled.contains(n)).collect())
    }
}

/// Walk up from the start directory to find .codebrowser.toml
fn find_config_file(start: &Path) -> Option<std::path::PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let config = current.join(CONFIG_FILE);
        if config.exists() {
            return Some(config);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Create a default .codebrowser.toml in the current directory
pub fn init_config() -> Result<()> {
    let config_path = std::env::current_dir()?.join(CONFIG_FILE);

    if config_path.exists() {
        println!("⚠️  {} already exists in this directory", CONFIG_FILE);
        return Ok(());
    }

    let default_config = r#"# codebrowser configuration

[adapters]
# Enable specific adapters (empty = all)
# enable = ["checkstyle", "pmd", "cpd", "padawan", "coverage"]

# Disable specific adapters
# disable = []

[source]
# Glob patterns to skip when --source is given
exclude = [
    "vendor/**",
    "**/*.min.js",
]
"#;

    std::fs::write(&config_path, default_config)?;
    println!("✅ Created {}", CONFIG_FILE);
    println!("   Edit it to customize adapters and source excludes.");

    Ok(())
}
