use serde::{Deserialize, Serialize};

/// Top-level converter configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GpassConfig {
    pub log: LogConfig,
    pub import: ImportConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (default: warn)
    pub level: String,
    /// Log format: "json" or "text"
    pub format: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Encoding label for text stored in the GPass file (e.g. "ISO-8859-15").
    /// Unset means: derive from the locale environment at startup.
    pub source_encoding: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Title of the single KeePassX group holding all entries
    pub group_title: String,
    /// KeePassX icon index for the group and its entries
    pub icon: u32,
    /// Unix permission bits for the written XML file (default: 0o600)
    pub file_mode: u32,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "text".into(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            group_title: "GPass entries".into(),
            icon: 1,
            file_mode: 0o600,
        }
    }
}

impl OutputConfig {
    /// The output holds every password in plaintext; refuse modes that let
    /// anyone but the owner read it.
    pub fn validate(&self) -> crate::GpassResult<()> {
        if self.file_mode & 0o077 != 0 {
            return Err(crate::GpassError::Config(format!(
                "output.file_mode {:o} must not grant group or other permissions",
                self.file_mode
            )));
        }
        Ok(())
    }
}
