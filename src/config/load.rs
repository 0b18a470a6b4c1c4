use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::types::TexpackConfig;

/// A loaded configuration file with its associated directory.
///
/// Paths in the config are relative to the config file location,
/// so we need to track where the config was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The parsed configuration
    pub config: TexpackConfig,
    /// The directory containing the config file
    pub config_dir: PathBuf,
}

impl LoadedConfig {
    /// Load a config file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        let config: TexpackConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("invalid config file {}: {}", path.display(), e))?;

        let config_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self { config, config_dir })
    }

    /// Input paths and patterns, resolved relative to the config directory.
    ///
    /// Patterns stay unexpanded; the sprite loader expands them.
    pub fn resolve_inputs(&self) -> Vec<PathBuf> {
        self.config
            .input
            .iter()
            .map(|input| self.config_dir.join(input))
            .collect()
    }

    /// Resolve the atlas PNG path relative to the config file directory.
    pub fn resolve_output(&self) -> PathBuf {
        self.config_dir.join(&self.config.output)
    }

    /// Resolve the descriptor path, if the config names one.
    pub fn resolve_descriptor(&self) -> Option<PathBuf> {
        self.config
            .descriptor
            .as_ref()
            .map(|descriptor| self.config_dir.join(descriptor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(json: &str, dir: &str) -> LoadedConfig {
        LoadedConfig {
            config: serde_json::from_str(json).unwrap(),
            config_dir: PathBuf::from(dir),
        }
    }

    #[test]
    fn test_paths_resolve_against_config_dir() {
        let lc = loaded(
            r#"{"input": ["sprites/*.png", "hero.png"], "output": "out/atlas.png"}"#,
            "/project",
        );

        assert_eq!(
            lc.resolve_inputs(),
            vec![
                PathBuf::from("/project/sprites/*.png"),
                PathBuf::from("/project/hero.png")
            ]
        );
        assert_eq!(lc.resolve_output(), PathBuf::from("/project/out/atlas.png"));
        assert_eq!(lc.resolve_descriptor(), None);
    }

    #[test]
    fn test_descriptor_resolves_when_present() {
        let lc = loaded(r#"{"descriptor": "atlas.json"}"#, "assets");

        assert_eq!(
            lc.resolve_descriptor(),
            Some(PathBuf::from("assets/atlas.json"))
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(LoadedConfig::load(Path::new("no/such/config.texpack")).is_err());
    }
}
