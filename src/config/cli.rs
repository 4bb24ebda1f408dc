use crate::config::toml_config::{TomlConfig, DEFAULT_CONFIG_FILE};
use crate::domain::model::{EndpointKind, Environment};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "obit-publisher")]
#[command(about = "Publish an obituary through the obituary intake API")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE, help = "Settings file")]
    pub config: PathBuf,

    #[arg(long, env = "OBIT_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, value_enum)]
    pub environment: Option<Environment>,

    #[arg(long, help = "Bypass the API gateway and use the direct intake endpoint")]
    pub direct: bool,

    #[arg(long, help = "Override the base URL (local testing)")]
    pub base_url: Option<String>,

    #[arg(long, help = "Default owner for drafts without one")]
    pub owner: Option<String>,

    #[arg(long, conflicts_with = "payload", help = "Obituary form (.toml or .json)")]
    pub draft: Option<PathBuf>,

    #[arg(long, help = "Complete request body as JSON")]
    pub payload: Option<PathBuf>,

    #[arg(long, help = "Print the request body without sending it")]
    pub dry_run: bool,

    #[arg(long, help = "Write the resolved settings back to the settings file")]
    pub save_config: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    /// 命令列參數優先於設定檔
    pub fn apply_to(&self, mut settings: TomlConfig) -> TomlConfig {
        if let Some(key) = &self.api_key {
            settings.api.key = key.clone();
        }
        if let Some(environment) = self.environment {
            settings.api.environment = environment;
        }
        if self.direct {
            settings.api.endpoint = EndpointKind::Direct;
        }
        if let Some(base_url) = &self.base_url {
            settings.api.base_url = Some(base_url.clone());
        }
        if let Some(owner) = &self.owner {
            settings.defaults.owner = Some(owner.clone());
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;

    #[test]
    fn test_cli_overrides_settings_file() {
        let mut file = TomlConfig::default();
        file.api.key = "file-key".to_string();
        file.api.environment = Environment::Dev;
        file.defaults.owner = Some("file-owner".to_string());

        let cli = CliConfig::parse_from([
            "obit-publisher",
            "--api-key",
            "cli-key",
            "--environment",
            "stage",
            "--direct",
        ]);
        let merged = cli.apply_to(file);

        assert_eq!(merged.api_key(), "cli-key");
        assert_eq!(merged.environment(), Environment::Stage);
        assert_eq!(merged.endpoint_kind(), EndpointKind::Direct);
        assert_eq!(merged.default_owner(), Some("file-owner"));
    }

    #[test]
    fn test_cli_rejects_unknown_environment() {
        let result = CliConfig::try_parse_from(["obit-publisher", "--environment", "prd"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_draft_and_payload_conflict() {
        let result = CliConfig::try_parse_from([
            "obit-publisher",
            "--draft",
            "a.toml",
            "--payload",
            "b.json",
        ]);
        assert!(result.is_err());
    }
}
