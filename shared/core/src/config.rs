use autotrader_error::AutotraderError;
use common::structs::{Market, Spread, TradingSettings};
use exchanges::{
    config::BITTREX_HTTP_BASE_URL,
    structs::{ApiCredentials, ApiEndpoints, ExchangeConfig},
};
use ini::Ini;
use serde::{Deserialize, Serialize};
use serde_json::from_reader;
use std::{collections::HashMap, fs::File, io::BufReader, path::Path};

/// Section holding the settings in an INI config file.
pub const CONFIG_SECTION: &str = "config";

/// Config-file numbers may be written either as JSON numbers or strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(f64),
    String(String),
}

impl NumberOrString {
    fn to_f64(&self, field: &str) -> Result<f64, AutotraderError> {
        match self {
            NumberOrString::Number(value) => Ok(*value),
            NumberOrString::String(value) => value.trim().parse::<f64>().map_err(|_| {
                AutotraderError::new_config(format!("{} must be numeric, got `{}`", field, value))
            }),
        }
    }
}

impl From<f64> for NumberOrString {
    fn from(value: f64) -> Self {
        NumberOrString::Number(value)
    }
}

/// Unvalidated settings, as read from flags or from the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSettings {
    /// May be left out of the file and supplied through the environment.
    #[serde(default)]
    pub apikey: String,
    #[serde(default)]
    pub secret: String,
    pub market: String,
    pub shares: NumberOrString,
    pub spread: String,
    #[serde(default)]
    pub poll_interval: Option<u64>,
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AutotraderConfig {
    pub trading_settings: TradingSettings,
    pub exchange_config: ExchangeConfig,
}

impl RawSettings {
    /// Loads a `.json` file as JSON and anything else as INI with a
    /// `[config]` section.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AutotraderError> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));

        let file = File::open(path).map_err(|error| {
            AutotraderError::new_config(format!(
                "unable to open config file {}: {}",
                path.display(),
                error
            ))
        })?;

        let result = if is_json {
            from_reader(BufReader::new(file)).map_err(AutotraderError::from)
        } else {
            let mut reader = BufReader::new(file);
            Ini::read_from(&mut reader)
                .map_err(|error| AutotraderError::new_config(error.to_string()))
                .and_then(|ini| Self::from_ini(&ini))
        };

        result.map_err(|error| {
            AutotraderError::new_config(format!(
                "invalid config file {}: {}",
                path.display(),
                error.description
            ))
        })
    }

    pub fn from_ini_str(content: &str) -> Result<Self, AutotraderError> {
        let ini = Ini::load_from_str(content)
            .map_err(|error| AutotraderError::new_config(error.to_string()))?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, AutotraderError> {
        let section = ini.section(Some(CONFIG_SECTION)).ok_or_else(|| {
            AutotraderError::new_config(format!("missing [{}] section", CONFIG_SECTION))
        })?;
        // keys are matched case-insensitively
        let mut values: HashMap<String, String> = section
            .iter()
            .map(|(key, value)| (key.to_lowercase(), value.trim().to_string()))
            .collect();

        let mut required = |key: &str| {
            values
                .remove(key)
                .ok_or_else(|| AutotraderError::new_config(format!("missing `{}` key", key)))
        };
        let market = required("market")?;
        let shares = NumberOrString::String(required("shares")?);
        let spread = required("spread")?;

        let poll_interval = match values.remove("poll_interval") {
            Some(value) => Some(value.parse::<u64>().map_err(|_| {
                AutotraderError::new_config(format!(
                    "poll_interval must be whole seconds, got `{}`",
                    value
                ))
            })?),
            None => None,
        };

        Ok(RawSettings {
            apikey: values.remove("apikey").unwrap_or_default(),
            secret: values.remove("secret").unwrap_or_default(),
            market,
            shares,
            spread,
            poll_interval,
            base_url: values.remove("base_url"),
        })
    }

    pub fn validate(self) -> Result<AutotraderConfig, AutotraderError> {
        if self.apikey.trim().is_empty() || self.secret.trim().is_empty() {
            return Err(AutotraderError::new_config(String::from(
                "apikey and secret must not be empty",
            )));
        }

        let market: Market = self.market.parse()?;
        let spread: Spread = self.spread.parse()?;
        let shares = self.shares.to_f64("shares")?;
        let trading_settings = TradingSettings::new(market, shares, spread, self.poll_interval)?;

        let base_url = self.base_url.as_deref().unwrap_or(BITTREX_HTTP_BASE_URL);
        let exchange_config = ExchangeConfig::new(
            ApiCredentials::new(self.apikey.trim(), self.secret.trim()),
            ApiEndpoints::new(base_url)?,
        );

        Ok(AutotraderConfig {
            trading_settings,
            exchange_config,
        })
    }
}
