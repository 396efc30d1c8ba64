use crate::config::ServerConfig;
use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "slack-options-responder")]
#[command(about = "Serves Slack external select options from a static catalog")]
pub struct CliArgs {
    /// Port to listen on (overrides PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Address to bind (overrides HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Catalog file, .json or .toml (overrides CONFIG_FILE)
    #[arg(long)]
    pub catalog: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Validate configuration and catalog, then exit without serving
    #[arg(long)]
    pub check: bool,
}

impl CliArgs {
    /// 命令列參數覆蓋環境變數設定
    pub fn apply(&self, config: &mut ServerConfig) {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(catalog) = &self.catalog {
            config.catalog_file = catalog.clone();
        }
        if self.log_json {
            config.log_format = crate::config::LogFormat::Json;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogFormat;

    fn base_config() -> ServerConfig {
        ServerConfig::from_lookup(|key| {
            (key == "SLACK_SIGNING_SECRET").then(|| "s3cret".to_string())
        })
        .unwrap()
    }

    #[test]
    fn test_flags_override_env() {
        let args = CliArgs::parse_from([
            "slack-options-responder",
            "--port",
            "9000",
            "--catalog",
            "options.toml",
            "--log-json",
        ]);
        let mut config = base_config();
        args.apply(&mut config);

        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.catalog_file, "options.toml");
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(!args.check);
    }

    #[test]
    fn test_no_flags_keep_env() {
        let args = CliArgs::parse_from(["slack-options-responder"]);
        let mut config = base_config();
        args.apply(&mut config);

        assert_eq!(config.port, 8080);
        assert_eq!(config.catalog_file, "catalog.json");
        assert_eq!(config.log_format, LogFormat::Compact);
    }
}
