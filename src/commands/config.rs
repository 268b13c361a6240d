use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// File name looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "statkeys.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Tag rule definitions
    #[serde(default = "default_tag_rules")]
    pub tag_rules: Utf8PathBuf,

    /// Category rule definitions
    #[serde(default = "default_category_rules")]
    pub category_rules: Utf8PathBuf,

    /// Destination of the generated dataset
    #[serde(default = "default_output")]
    pub output: Utf8PathBuf,

    /// Whether the cluster host is recorded in the dataset
    #[serde(default = "default_store_host")]
    pub store_host: bool,
}

fn default_tag_rules() -> Utf8PathBuf {
    Utf8PathBuf::from("rules/key_tags.hexa")
}

fn default_category_rules() -> Utf8PathBuf {
    Utf8PathBuf::from("rules/key_cats.hexa")
}

fn default_output() -> Utf8PathBuf {
    Utf8PathBuf::from("web_app/js/keys.js")
}

const fn default_store_host() -> bool {
    true
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if any of the paths is empty
    fn validate(&self) -> Result<()> {
        for (name, path) in [("tag_rules", &self.tag_rules), ("category_rules", &self.category_rules), ("output", &self.output)] {
            if path.as_str().trim().is_empty() {
                return Err(app_err!("{name} must not be empty"));
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
