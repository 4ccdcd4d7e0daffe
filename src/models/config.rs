use sbci_format::{PaletteBuilder, PaletteTable, SnfpMode};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

use crate::error::ConvertError;

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Binary 16-slot image
    #[default]
    Sbci,
    /// Legacy nearest-color text format
    Nfp,
}

impl OutputFormat {
    /// File extension written for this format
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Sbci => "sbci",
            OutputFormat::Nfp => "nfp",
        }
    }
}

fn deserialize_palette_table<'de, D>(deserializer: D) -> Result<PaletteTable, D::Error>
where
    D: Deserializer<'de>,
{
    let layout = String::deserialize(deserializer)?;
    layout.parse().map_err(serde::de::Error::custom)
}

/// Converter configuration loaded from a YAML file
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Scale images to fit inside a `size` x `size` box (0 keeps source size)
    pub size: u32,

    /// Output format
    pub format: OutputFormat,

    /// Request ASCII sbci output
    pub ascii: bool,

    /// Palette table layout for sbci output (`sparse` or `full`)
    #[serde(deserialize_with = "deserialize_palette_table")]
    pub palette_table: PaletteTable,

    /// Dither while reducing colors
    pub dither: bool,

    /// Fail when colors are dropped instead of falling back to slot 0
    pub strict: bool,

    /// Write a `<name>-quantized.png` preview next to the output
    pub write_quantized: bool,

    /// Reference palette override (exactly 16 hex colors)
    pub palette: Option<Vec<String>>,

    /// Directory for output files (defaults to the input's directory)
    pub out_dir: Option<PathBuf>,
}

fn default_size() -> u32 {
    40
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            format: OutputFormat::default(),
            ascii: false,
            palette_table: PaletteTable::default(),
            dither: true,
            strict: false,
            write_quantized: true,
            palette: None,
            out_dir: None,
        }
    }
}

impl AppConfig {
    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConvertError> {
        serde_yaml::from_str(content).map_err(|e| ConvertError::Config(e.to_string()))
    }

    /// Load configuration from an optional file.
    ///
    /// No path means defaults. A path that does not exist is logged and
    /// also yields defaults; a file that exists but does not parse is an
    /// error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConvertError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        match std::fs::read_to_string(path) {
            Ok(content) => {
                let config = Self::from_yaml(&content)?;
                tracing::info!(
                    path = %path.display(),
                    format = ?config.format,
                    size = config.size,
                    "Loaded configuration"
                );
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "Config file not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Build the reference palette, falling back to the built-in one
    pub fn reference_palette(&self) -> Result<PaletteBuilder, ConvertError> {
        match &self.palette {
            Some(colors) => {
                let colors: Vec<&str> = colors.iter().map(String::as_str).collect();
                Ok(PaletteBuilder::from_hex(&colors)?)
            }
            None => Ok(PaletteBuilder::cc_default()),
        }
    }

    /// sbci encoding mode
    pub fn mode(&self) -> SnfpMode {
        if self.ascii {
            SnfpMode::Ascii
        } else {
            SnfpMode::Binary
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.size, 40);
        assert_eq!(config.format, OutputFormat::Sbci);
        assert_eq!(config.palette_table, PaletteTable::Sparse);
        assert!(config.dither);
        assert!(config.write_quantized);
        assert!(!config.strict);
        assert_eq!(config.mode(), SnfpMode::Binary);
        assert_eq!(
            config.reference_palette().unwrap(),
            PaletteBuilder::cc_default()
        );
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let config = AppConfig::from_yaml(include_str!("../../config.yaml")).unwrap();

        assert_eq!(config.size, 40);
        assert_eq!(config.format, OutputFormat::Sbci);
        assert_eq!(
            config.reference_palette().unwrap(),
            PaletteBuilder::cc_default()
        );
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = AppConfig::from_yaml("format: nfp\nstrict: true\n").unwrap();

        assert_eq!(config.format, OutputFormat::Nfp);
        assert!(config.strict);
        assert_eq!(config.size, 40);
        assert!(config.write_quantized);
    }

    #[test]
    fn test_full_palette_table_layout() {
        let config = AppConfig::from_yaml("palette_table: Full\ndither: false").unwrap();
        assert_eq!(config.palette_table, PaletteTable::Full);
        assert!(!config.dither);
    }

    #[test]
    fn test_unknown_palette_table_is_error() {
        let result = AppConfig::from_yaml("palette_table: dense");
        assert!(matches!(result, Err(ConvertError::Config(msg)) if msg.contains("dense")));
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let result = AppConfig::from_yaml("format: jpeg");
        assert!(matches!(result, Err(ConvertError::Config(_))));
    }

    #[test]
    fn test_short_palette_rejected() {
        let config = AppConfig::from_yaml("palette: ['#000000', '#ffffff']").unwrap();
        assert!(matches!(
            config.reference_palette(),
            Err(ConvertError::Palette(_))
        ));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(Some(&dir.path().join("nope.yaml"))).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sbci.yaml");
        std::fs::write(&path, "size: 0\nascii: true\n").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.size, 0);
        assert_eq!(config.mode(), SnfpMode::Ascii);
    }

    #[test]
    fn test_extensions() {
        assert_eq!(OutputFormat::Sbci.extension(), "sbci");
        assert_eq!(OutputFormat::Nfp.extension(), "nfp");
    }
}
