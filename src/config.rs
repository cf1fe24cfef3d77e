use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::util::{bits::BitWidth, error::BitError};

// === DemoConfig === //

/// The inputs of a single demo run.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    pub mask: i64,
    pub data: i64,

    /// Rows are padded to a multiple of this many bits. Zero disables rounding.
    pub pad_multiple: u32,

    /// Rows are never narrower than this many bits, before rounding.
    pub min_width: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            mask: 0b0111_1111_1111_1111_1111_1111,
            data: 0b1111_1111_1111,
            pad_multiple: BitWidth::BYTE.get(),
            min_width: 0,
        }
    }
}

impl DemoConfig {
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(text).context("malformed demo config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BitError> {
        if self.min_width > BitWidth::MAX.get() {
            return Err(BitError::InvalidWidth {
                width: self.min_width.into(),
            });
        }

        Ok(())
    }

    /// Layers `args` over the defaults, reading `args.config` first if it was given.
    pub fn resolve(args: &CliArgs) -> anyhow::Result<Self> {
        let mut config = match &args.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file {}", path.display()))?;

                Self::from_json(&text)
                    .with_context(|| format!("failed to load config file {}", path.display()))?
            }
            None => Self::default(),
        };

        if let Some(mask) = args.mask {
            config.mask = mask;
        }

        if let Some(data) = args.data {
            config.data = data;
        }

        if let Some(pad_multiple) = args.pad_multiple {
            config.pad_multiple = pad_multiple;
        }

        if let Some(min_width) = args.min_width {
            config.min_width = min_width;
        }

        config.validate()?;
        Ok(config)
    }
}

// === CliArgs === //

#[derive(Parser, Debug, Default)]
#[command(name = "bytewise")]
#[command(about = "Set, clear, and toggle masked bits and print the results LSB-first", long_about = None)]
pub struct CliArgs {
    /// JSON file holding any of `mask`, `data`, `pad_multiple`, and `min_width`
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Mask selecting the bits to operate on
    #[arg(short, long, allow_negative_numbers = true)]
    pub mask: Option<i64>,

    /// Data the mask is applied to
    #[arg(short, long, allow_negative_numbers = true)]
    pub data: Option<i64>,

    /// Pad rows to a multiple of this many bits (0 disables padding)
    #[arg(short, long)]
    pub pad_multiple: Option<u32>,

    /// Minimum row width in bits
    #[arg(long)]
    pub min_width: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_sample_inputs() {
        let config = DemoConfig::default();
        assert_eq!(config.mask, 8388607);
        assert_eq!(config.data, 4095);
        assert_eq!(config.pad_multiple, 8);
        assert_eq!(config.min_width, 0);
    }

    #[test]
    fn json_fills_missing_fields() {
        let config = DemoConfig::from_json(r#"{ "data": -6803358 }"#).unwrap();
        assert_eq!(
            config,
            DemoConfig {
                data: -6803358,
                ..DemoConfig::default()
            }
        );
    }

    #[test]
    fn json_rejects_bad_input() {
        assert!(DemoConfig::from_json(r#"{ "bogus": 1 }"#).is_err());
        assert!(DemoConfig::from_json(r#"{ "min_width": 65 }"#).is_err());
        assert!(DemoConfig::from_json("[").is_err());
    }

    #[test]
    fn cli_flags_override_defaults() {
        let args = CliArgs::parse_from(["bytewise", "--mask", "-1", "-p", "16"]);
        let config = DemoConfig::resolve(&args).unwrap();

        assert_eq!(config.mask, -1);
        assert_eq!(config.data, 4095);
        assert_eq!(config.pad_multiple, 16);
    }

    #[test]
    fn cli_flags_override_file() {
        let path = std::env::temp_dir().join(format!("bytewise-{}.json", std::process::id()));
        fs::write(&path, r#"{ "mask": 255, "data": 15, "min_width": 32 }"#).unwrap();

        let args = CliArgs {
            config: Some(path.clone()),
            data: Some(3),
            ..CliArgs::default()
        };
        let config = DemoConfig::resolve(&args);
        fs::remove_file(&path).unwrap();

        assert_eq!(
            config.unwrap(),
            DemoConfig {
                mask: 255,
                data: 3,
                pad_multiple: 8,
                min_width: 32,
            }
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let args = CliArgs {
            config: Some(PathBuf::from("/nonexistent/bytewise.json")),
            ..CliArgs::default()
        };

        assert!(DemoConfig::resolve(&args).is_err());
    }

    #[test]
    fn oversized_min_width_is_rejected() {
        let args = CliArgs {
            min_width: Some(100),
            ..CliArgs::default()
        };

        let err = DemoConfig::resolve(&args).unwrap_err();
        assert_eq!(
            err.downcast_ref::<BitError>(),
            Some(&BitError::InvalidWidth { width: 100 })
        );
    }
}
