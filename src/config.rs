use serde::Deserialize;
use std::error;
use std::fmt;

const DEFAULT_MARKET_API_URL: &str = "https://rest.coincap.io/v3";
const MAX_ASSET_LIMIT: u32 = 2000;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_market_api_url")]
    pub market_api_url: String, // Base URL of the market-data REST API, `/assets` is appended
    #[serde(default)]
    pub market_api_key: Option<String>, // Sent as a bearer token when present, public access otherwise
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub log_level: Option<String>, // trace, debug, info, warn or error
    #[serde(default)]
    pub posts_path: Option<String>, // JSON export of the posts table, used for the sidebar curation
    pub panels: Vec<PanelConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelKind {
    Ticker,
    Sidebar,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PanelConfig {
    pub name: String,
    pub kind: PanelKind,
    pub limit: Option<u32>, // Number of assets requested per refresh
    pub refresh_secs: Option<u64>, // Data refresh period, in seconds
    pub rotate_secs: Option<u64>, // Page rotation period, in seconds
    pub page_size: Option<usize>, // Assets shown per page
}

impl PanelConfig {
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(match self.kind {
            PanelKind::Ticker => 15,
            PanelKind::Sidebar => 18,
        })
    }

    pub fn refresh_secs(&self) -> u64 {
        self.refresh_secs.unwrap_or(match self.kind {
            PanelKind::Ticker => 30,
            PanelKind::Sidebar => 60,
        })
    }

    pub fn rotate_secs(&self) -> u64 {
        self.rotate_secs.unwrap_or(5)
    }

    pub fn page_size(&self) -> usize {
        self.page_size.unwrap_or(match self.kind {
            PanelKind::Ticker => 15,
            PanelKind::Sidebar => 6,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::InvalidPanel {
                panel: self.name.clone(),
                reason: "name is empty",
            });
        }
        if !(1..=MAX_ASSET_LIMIT).contains(&self.limit()) {
            return Err(ConfigError::InvalidPanel {
                panel: self.name.clone(),
                reason: "limit must be between 1 and 2000",
            });
        }
        if self.refresh_secs() == 0 || self.rotate_secs() == 0 {
            return Err(ConfigError::InvalidPanel {
                panel: self.name.clone(),
                reason: "intervals must be at least one second",
            });
        }
        if self.page_size() == 0 {
            return Err(ConfigError::InvalidPanel {
                panel: self.name.clone(),
                reason: "page size must be at least 1",
            });
        }
        Ok(())
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        for panel in &config.panels {
            panel.validate()?;
        }
        Ok(config)
    }
}

fn default_market_api_url() -> String {
    DEFAULT_MARKET_API_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    JsonParse(serde_json::Error),
    InvalidPanel { panel: String, reason: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ConfigError::Io(ref err) => write!(f, "IO Error: {}", err),
            ConfigError::JsonParse(ref err) => write!(f, "JSON Parse Error: {}", err),
            ConfigError::InvalidPanel { ref panel, reason } => {
                write!(f, "Invalid panel '{}': {}", panel, reason)
            }
        }
    }
}

impl error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            ConfigError::Io(ref err) => Some(err),
            ConfigError::JsonParse(ref err) => Some(err),
            ConfigError::InvalidPanel { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> ConfigError {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> ConfigError {
        ConfigError::JsonParse(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_per_kind() {
        let config = Config::from_json(
            r#"{"panels":[{"name":"header","kind":"ticker"},{"name":"crypto-daily","kind":"sidebar"}]}"#,
        )
        .unwrap();

        assert_eq!("https://rest.coincap.io/v3", config.market_api_url);
        assert_eq!(None, config.market_api_key);
        assert_eq!(10, config.request_timeout_secs);

        let ticker = &config.panels[0];
        assert_eq!(PanelKind::Ticker, ticker.kind);
        assert_eq!((15, 30, 5, 15), (ticker.limit(), ticker.refresh_secs(), ticker.rotate_secs(), ticker.page_size()));

        let sidebar = &config.panels[1];
        assert_eq!(PanelKind::Sidebar, sidebar.kind);
        assert_eq!((18, 60, 5, 6), (sidebar.limit(), sidebar.refresh_secs(), sidebar.rotate_secs(), sidebar.page_size()));
    }

    #[test]
    fn test_rejects_invalid_panels() {
        let err = Config::from_json(r#"{"panels":[{"name":"x","kind":"sidebar","page_size":0}]}"#)
            .unwrap_err();
        assert_eq!("Invalid panel 'x': page size must be at least 1", format!("{}", err));

        assert!(Config::from_json(r#"{"panels":[{"name":"x","kind":"ticker","limit":0}]}"#).is_err());
        assert!(Config::from_json(r#"{"panels":[{"name":" ","kind":"ticker"}]}"#).is_err());
        assert!(Config::from_json(r#"{"panels":[{"name":"x","kind":"ticker","rotate_secs":0}]}"#).is_err());
        assert!(matches!(
            Config::from_json(r#"{"panels":[{"name":"x","kind":"banner"}]}"#),
            Err(ConfigError::JsonParse(_))
        ));
    }
}
