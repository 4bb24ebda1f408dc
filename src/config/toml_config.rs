use crate::core::ConfigProvider;
use crate::domain::model::{EndpointKind, Environment};
use crate::utils::error::{PublishError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "obit-publisher.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub key: String,
    pub environment: Environment,
    pub endpoint: EndpointKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PublishError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 檔案不存在時使用預設值 (prod、空 API key)
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            tracing::debug!("Loading settings from {}", path.as_ref().display());
            Self::from_file(path)
        } else {
            tracing::debug!(
                "Settings file {} not found, using defaults",
                path.as_ref().display()
            );
            Ok(Self::default())
        }
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content)
            .map_err(|e| PublishError::config(format!("TOML parsing error: {}", e)))
    }

    /// 替換環境變數 (例如 ${OBIT_API_KEY})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    /// 寫回設定檔；API key 為空時拒絕儲存
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.validate()?;

        let content = toml::to_string_pretty(self)
            .map_err(|e| PublishError::config(format!("TOML serialization error: {}", e)))?;

        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&path, content)?;
        tracing::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("api.key", &self.api.key)?;
        if let Some(base_url) = &self.api.base_url {
            validate_url("api.base_url", base_url)?;
        }
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn api_key(&self) -> &str {
        &self.api.key
    }

    fn environment(&self) -> Environment {
        self.api.environment
    }

    fn endpoint_kind(&self) -> EndpointKind {
        self.api.endpoint
    }

    fn base_url_override(&self) -> Option<&str> {
        self.api.base_url.as_deref()
    }

    fn default_owner(&self) -> Option<&str> {
        self.defaults.owner.as_deref().filter(|o| !o.trim().is_empty())
    }
}
