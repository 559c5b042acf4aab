use std::path::PathBuf;

use clap::Parser;
use leafscan_config::Config;

/// Identify diseases on pepper, potato and tomato leaves
#[derive(Debug, Parser)]
#[command(name = "leafscan", version)]
pub struct Args {
    /// Leaf image to select on startup
    pub image: Option<PathBuf>,

    /// JSON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Prediction service URL, overrides config and environment
    #[arg(long)]
    pub base_url: Option<String>,

    /// Debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Config file and environment first, then command-line overrides
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(url) = self.base_url.as_deref().filter(|u| !u.trim().is_empty()) {
            tracing::debug!("Base URL from command line: {}", url);
            config.network.base_url = url.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use super::*;

    #[test]
    fn test_base_url_beats_file_and_env() {
        let args = Args::try_parse_from(["leafscan", "--base-url", "http://cli:7000"]).unwrap();
        let mut config =
            Config::from_json_str(r#"{"network":{"base_url":"http://file:6000"}}"#).unwrap();
        config.network.apply_env(Some("http://env:5001".to_string()));
        assert_eq!(config.network.base_url, "http://env:5001");

        args.apply_overrides(&mut config);
        assert_eq!(config.network.base_url, "http://cli:7000");
    }

    #[test]
    fn test_config_file_then_flag() {
        let dir = std::env::temp_dir().join(format!("leafscan-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(
            &path,
            r#"{"network":{"base_url":"http://file:6000","request_timeout_secs":9}}"#,
        )
        .unwrap();

        let args = Args::try_parse_from([
            OsString::from("leafscan"),
            OsString::from("--config"),
            path.clone().into_os_string(),
            OsString::from("--base-url"),
            OsString::from("http://cli:7000"),
        ])
        .unwrap();
        let config = args.load_config().unwrap();

        assert_eq!(config.network.base_url, "http://cli:7000");
        assert_eq!(config.network.request_timeout_secs, 9);
    }

    #[test]
    fn test_without_flag_keeps_config() {
        let args = Args::try_parse_from(["leafscan", "leaf.jpg", "-v"]).unwrap();
        let mut config = Config::default();
        args.apply_overrides(&mut config);

        assert_eq!(config.network.base_url, "http://localhost:5000");
        assert_eq!(args.image, Some(PathBuf::from("leaf.jpg")));
        assert!(args.verbose);
    }
}
