use crate::chain::OverflowPolicy;
use crate::error::{Error, Result};
use crate::muted_error;
use serde::Deserialize;
use std::fs::read_to_string;
use std::path::Path;

/// Application configuration, read from a TOML file.
///
/// Example:
/// ```toml
/// overflow = "wrapping"
/// extensions = ["c", "h"]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Overflow behavior of the call chain.
    pub overflow: OverflowPolicy,
    /// Source file extensions searched for function definitions.
    pub extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            overflow: OverflowPolicy::default(),
            extensions: ["c", "cpp", "h"].map(String::from).to_vec(),
        }
    }
}

impl Config {
    const DEFAULT_PATH: &'static str = ".config/calltrace/config.toml";

    /// Load configuration from `path`, or from the default location in user home if `path`
    /// is `None`. A missing default file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let data = match path {
            None => {
                let Some(data) = home::home_dir()
                    .and_then(|home| muted_error!(read_to_string(home.join(Self::DEFAULT_PATH))))
                else {
                    return Ok(Self::default());
                };
                data
            }
            Some(path) => read_to_string(path)
                .map_err(|e| Error::ConfigRead(path.display().to_string(), e))?,
        };

        Self::from_toml(&data)
    }

    pub fn from_toml(data: &str) -> Result<Self> {
        Ok(toml::de::from_str(data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml() {
        let cfg = Config::from_toml("overflow = \"saturating\"").unwrap();
        assert_eq!(cfg.overflow, OverflowPolicy::Saturating);
        assert_eq!(cfg.extensions, Config::default().extensions);

        let cfg = Config::from_toml("extensions = [\"c\"]").unwrap();
        assert_eq!(cfg.overflow, OverflowPolicy::Checked);
        assert_eq!(cfg.extensions, vec!["c".to_string()]);

        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Config::from_toml("overflow = \"panic\""),
            Err(Error::ConfigParse(_))
        ));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let path = std::env::temp_dir().join(format!("{}.toml", uuid::Uuid::new_v4()));
        assert!(matches!(
            Config::load(Some(&path)),
            Err(Error::ConfigRead(_, _))
        ));
    }
}
