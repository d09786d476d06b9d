use autotrader_error::AutotraderError;
use clap::Parser;
use std::path::PathBuf;
use trader_core::config::RawSettings;

/// Alternates BUY and SELL limit orders on one Bittrex market.
#[derive(Debug, Parser)]
#[command(name = "autotrader", version)]
pub struct Args {
    /// Settings file: INI with a [config] section, or JSON when named *.json.
    /// Replaces --market, --shares and --spread
    #[arg(long, value_name = "FILE", conflicts_with_all = ["market", "shares", "spread"])]
    pub conf: Option<PathBuf>,

    #[arg(
        long,
        env = "AUTOTRADER_APIKEY",
        hide_env_values = true,
        required_unless_present = "conf"
    )]
    pub apikey: Option<String>,

    #[arg(
        long,
        env = "AUTOTRADER_SECRET",
        hide_env_values = true,
        required_unless_present = "conf"
    )]
    pub secret: Option<String>,

    /// Trading pair, e.g. BTC-LTC
    #[arg(long, required_unless_present = "conf")]
    pub market: Option<String>,

    /// Minimum units per order
    #[arg(long, required_unless_present = "conf")]
    pub shares: Option<f64>,

    /// markup/markdown, e.g. 0.02/0.01
    #[arg(long, required_unless_present = "conf")]
    pub spread: Option<String>,

    /// Seconds between polls of an open order [default: 30]
    #[arg(long, value_name = "SECONDS")]
    pub poll_interval: Option<u64>,

    /// Exchange API root
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
}

impl Args {
    /// Flags win over the config file for credentials, poll interval and
    /// base url.
    pub fn into_raw_settings(self) -> Result<RawSettings, AutotraderError> {
        let mut settings = match &self.conf {
            Some(path) => RawSettings::from_file(path)?,
            None => RawSettings {
                apikey: String::new(),
                secret: String::new(),
                market: self.market.unwrap_or_default(),
                shares: self.shares.unwrap_or_default().into(),
                spread: self.spread.unwrap_or_default(),
                poll_interval: None,
                base_url: None,
            },
        };

        if let Some(apikey) = self.apikey {
            settings.apikey = apikey;
        }
        if let Some(secret) = self.secret {
            settings.secret = secret;
        }
        if self.poll_interval.is_some() {
            settings.poll_interval = self.poll_interval;
        }
        if self.base_url.is_some() {
            settings.base_url = self.base_url;
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind as ClapErrorKind;
    use std::{env::temp_dir, fs::write, process};
    use trader_core::config::NumberOrString;

    #[test]
    fn test_flags_mode_builds_raw_settings() {
        let args = Args::try_parse_from([
            "autotrader",
            "--apikey",
            "key",
            "--secret",
            "secret",
            "--market",
            "BTC-LTC",
            "--shares",
            "10",
            "--spread",
            "0.02/0.01",
            "--poll-interval",
            "5",
        ])
        .unwrap();

        let settings = args.into_raw_settings().unwrap();
        assert_eq!(settings.apikey, "key");
        assert_eq!(settings.market, "BTC-LTC");
        assert_eq!(settings.shares, NumberOrString::Number(10.0));
        assert_eq!(settings.poll_interval, Some(5));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_conf_conflicts_with_individual_flags() {
        let error = Args::try_parse_from([
            "autotrader",
            "--conf",
            "autotrader.json",
            "--market",
            "BTC-LTC",
        ])
        .unwrap_err();
        assert_eq!(error.kind(), ClapErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_individual_flags_required_without_conf() {
        let error = Args::try_parse_from([
            "autotrader",
            "--apikey",
            "key",
            "--secret",
            "secret",
            "--market",
            "BTC-LTC",
        ])
        .unwrap_err();
        assert_eq!(error.kind(), ClapErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_conf_mode_reads_file_and_flags_override_credentials() {
        let path = temp_dir().join(format!("autotrader-args-{}.json", process::id()));
        write(
            &path,
            r#"{"apikey":"file-key","secret":"file-secret","market":"BTC-ETH","shares":"3","spread":"0.1/0.1"}"#,
        )
        .unwrap();

        let args = Args::try_parse_from([
            "autotrader",
            "--conf",
            path.to_str().unwrap(),
            "--apikey",
            "flag-key",
        ])
        .unwrap();
        let settings = args.into_raw_settings().unwrap();
        assert_eq!(settings.apikey, "flag-key");
        assert_eq!(settings.secret, "file-secret");
        assert_eq!(settings.market, "BTC-ETH");

        let config = settings.validate().unwrap();
        assert_eq!(config.trading_settings.shares, 3.0);

        let _ = std::fs::remove_file(&path);
    }
}
