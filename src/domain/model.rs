use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Stage,
    #[default]
    Prod,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Stage => "stage",
            Environment::Prod => "prod",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Environment::Dev),
            "stage" => Ok(Environment::Stage),
            "prod" => Ok(Environment::Prod),
            other => Err(format!(
                "unknown environment '{}', expected one of dev, stage, prod",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointKind {
    #[default]
    Gateway,
    Direct,
}

impl EndpointKind {
    /// 依端點類型與環境取得固定的 base URL；`Direct` 繞過 API Gateway
    pub fn base_url(&self, environment: Environment) -> &'static str {
        match (self, environment) {
            (EndpointKind::Gateway, Environment::Dev) => {
                "https://h8j5wx2ek8.execute-api.us-east-1.amazonaws.com/dev"
            }
            (EndpointKind::Gateway, Environment::Stage) => {
                "https://osw92dhpje.execute-api.us-east-1.amazonaws.com/stage"
            }
            (EndpointKind::Gateway, Environment::Prod) => {
                "https://eqvuex5md7.execute-api.us-east-1.amazonaws.com/prod"
            }
            (EndpointKind::Direct, Environment::Dev) => "https://obit-intake.dev.legint.net/api",
            (EndpointKind::Direct, Environment::Stage) => {
                "https://obit-intake.stage.legint.net/api"
            }
            (EndpointKind::Direct, Environment::Prod) => "https://obit-intake.prod.legint.net/api",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    pub first: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle: Option<String>,
    pub last: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maiden: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl PersonName {
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            prefix: None,
            first: first.into(),
            middle: None,
            last: last.into(),
            maiden: None,
            nickname: None,
            suffix: None,
        }
    }
}

/// 日期皆為 MMDDYYYY，月或日未知時以 `00` 表示
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub name: PersonName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_death: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObituaryType {
    #[default]
    Paid,
    Free,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObituaryContent {
    pub obituary_text: String,
    /// YYYY-MM-DD
    pub publish_start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_end_date: Option<String>,
    #[serde(default)]
    pub obituary_type: ObituaryType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Publisher,
    Adn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub source_type: SourceType,
    pub source: String,
    pub source_reference_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_reference_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_reference_id: Option<String>,
}

impl SourceInfo {
    /// publisher 來源必填的欄位
    pub fn publisher_fields(&self) -> [(&'static str, &Option<String>); 4] {
        [
            ("source_info.provider", &self.provider),
            ("source_info.provider_reference_id", &self.provider_reference_id),
            ("source_info.owner", &self.owner),
            ("source_info.owner_reference_id", &self.owner_reference_id),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObituaryRequest {
    pub person: PersonRecord,
    pub obituary: ObituaryContent,
    pub source_info: SourceInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObituaryResult {
    pub obituary_id: String,
    pub redirector_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing_is_strict() {
        assert_eq!("stage".parse::<Environment>(), Ok(Environment::Stage));
        assert!("prd".parse::<Environment>().is_err());
        assert_eq!(Environment::default(), Environment::Prod);
    }

    #[test]
    fn test_each_environment_maps_to_its_own_url() {
        for kind in [EndpointKind::Gateway, EndpointKind::Direct] {
            for env in [Environment::Dev, Environment::Stage, Environment::Prod] {
                assert!(
                    kind.base_url(env).contains(env.as_str()),
                    "{:?} {} -> {}",
                    kind,
                    env,
                    kind.base_url(env)
                );
            }
        }
    }

    #[test]
    fn test_endpoint_tables() {
        assert_eq!(
            EndpointKind::Direct.base_url(Environment::Stage),
            "https://obit-intake.stage.legint.net/api"
        );
        assert_eq!(
            EndpointKind::Gateway.base_url(Environment::Dev),
            "https://h8j5wx2ek8.execute-api.us-east-1.amazonaws.com/dev"
        );
    }

    #[test]
    fn test_enums_serialize_lowercase_and_optionals_are_omitted() {
        let source = SourceInfo {
            source_type: SourceType::Adn,
            source: "adnet".to_string(),
            source_reference_id: "77".to_string(),
            provider: None,
            provider_reference_id: None,
            owner: None,
            owner_reference_id: None,
        };
        let json = serde_json::to_value(&source).unwrap();
        assert_eq!(json["source_type"], "adn");
        assert!(json.get("provider").is_none());
        assert_eq!(serde_json::to_value(ObituaryType::Free).unwrap(), "free");
    }

    #[test]
    fn test_result_without_warnings() {
        let result: ObituaryResult =
            serde_json::from_str(r#"{"obituary_id":"abc123","redirector_url":"https://x/y"}"#)
                .unwrap();
        assert_eq!(result.obituary_id, "abc123");
        assert!(result.warnings.is_none());
    }
}
