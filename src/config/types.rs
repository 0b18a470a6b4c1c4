use serde::{Deserialize, Serialize};

use crate::cli::CompressionLevel;
use crate::packing::{MAX_BORDER, PackMode};

/// PNG compression level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CompressConfig {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression ("max")
    Max(String),
}

impl CompressConfig {
    pub fn level(&self) -> Result<CompressionLevel, String> {
        match self {
            CompressConfig::Level(n) => n.to_string().parse(),
            CompressConfig::Max(s) => s.parse(),
        }
    }
}

/// texpack configuration file structure.
///
/// All paths in the config are relative to the config file location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TexpackConfig {
    /// Config file version (currently 1)
    pub version: u32,
    /// Input file paths, directories or glob patterns
    pub input: Vec<String>,
    /// Output atlas PNG
    pub output: String,
    /// Output descriptor file; defaults to out.xml or out.json by format
    pub descriptor: Option<String>,
    /// Placement algorithm: "blf" or "next-fit"
    pub mode: PackMode,
    /// Gap in pixels kept around every image
    pub border: u32,
    /// Trim transparent margins before packing
    pub trim: bool,
    /// Place tallest images first
    pub sort: bool,
    /// Output RGB instead of RGBA (opaque atlas)
    pub opaque: bool,
    /// PNG compression configuration (optional)
    pub compress: Option<CompressConfig>,
}

impl Default for TexpackConfig {
    fn default() -> Self {
        Self {
            version: 1,
            input: Vec::new(),
            output: "out.png".to_string(),
            descriptor: None,
            mode: PackMode::Blf,
            border: 2,
            trim: false,
            sort: true,
            opaque: false,
            compress: None,
        }
    }
}

impl TexpackConfig {
    /// Reject values the command line would not accept either
    pub fn validate(&self) -> Result<(), String> {
        if self.border > MAX_BORDER {
            return Err(format!(
                "border must be at most {}, got {}",
                MAX_BORDER, self.border
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: TexpackConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, TexpackConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let config: TexpackConfig = serde_json::from_str(
            r#"{
                "input": ["sprites/*.png", "ui"],
                "output": "build/atlas.png",
                "descriptor": "build/atlas.xml",
                "mode": "next-fit",
                "border": 1,
                "trim": true,
                "sort": false,
                "compress": "max"
            }"#,
        )
        .unwrap();

        assert_eq!(config.input, vec!["sprites/*.png", "ui"]);
        assert_eq!(config.mode, PackMode::NextFit);
        assert_eq!(config.border, 1);
        assert!(config.trim);
        assert!(!config.sort);
        assert_eq!(
            config.compress.map(|c| c.level()),
            Some(Ok(CompressionLevel::Max))
        );
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let result = serde_json::from_str::<TexpackConfig>(r#"{"mode": "maxrects"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_border_is_bounded() {
        let config: TexpackConfig = serde_json::from_str(r#"{"border": 3000000000}"#).unwrap();
        assert!(config.validate().is_err());

        let config = TexpackConfig {
            border: MAX_BORDER,
            ..TexpackConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_compress_level_out_of_range() {
        assert!(CompressConfig::Level(9).level().is_err());
        assert_eq!(CompressConfig::Level(3).level(), Ok(CompressionLevel::Level(3)));
    }
}
