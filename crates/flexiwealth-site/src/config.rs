use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::contact::is_valid_email;
use crate::error::SiteConfigError;

/// Inbox that receives contact-form submissions unless configured otherwise.
pub const DEFAULT_CONTACT_RECIPIENT: &str = "ask.flexiwealth@outlook.com";
/// Remote display-data requests give up after this many seconds by default.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

fn default_recipient() -> String {
    DEFAULT_CONTACT_RECIPIENT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Document-store endpoint serving the `stats` and `testimonials` collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteContentConfig {
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_recipient")]
    pub contact_recipient: String,
    /// No remote source means the built-in display data is served.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<RemoteContentConfig>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            contact_recipient: default_recipient(),
            content: None,
        }
    }
}

impl SiteConfig {
    /// Load from a `.yaml`/`.yml` or `.json` file; other extensions are read as YAML.
    pub fn from_path(path: &Path) -> Result<Self, SiteConfigError> {
        let display = path.display().to_string();
        let contents = fs::read_to_string(path).map_err(|source| SiteConfigError::Io {
            path: display.clone(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config: SiteConfig = if is_json {
            serde_json::from_str(&contents).map_err(|e| SiteConfigError::Parse {
                path: display.clone(),
                reason: e.to_string(),
            })?
        } else {
            serde_yaml::from_str(&contents).map_err(|e| SiteConfigError::Parse {
                path: display.clone(),
                reason: e.to_string(),
            })?
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SiteConfigError> {
        if !is_valid_email(&self.contact_recipient) {
            return Err(SiteConfigError::Invalid {
                field: "contact_recipient".into(),
                reason: format!("'{}' is not an email address", self.contact_recipient),
            });
        }
        if let Some(content) = &self.content {
            if !(content.base_url.starts_with("http://") || content.base_url.starts_with("https://"))
            {
                return Err(SiteConfigError::Invalid {
                    field: "content.base_url".into(),
                    reason: "must be an http(s) URL".into(),
                });
            }
            if content.timeout_secs == 0 {
                return Err(SiteConfigError::Invalid {
                    field: "content.timeout_secs".into(),
                    reason: "must be > 0".into(),
                });
            }
        }
        Ok(())
    }
}
