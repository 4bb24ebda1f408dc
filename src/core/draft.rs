use crate::core::example::version_stamp;
use crate::core::ObituaryRequest;
use crate::domain::model::{
    ObituaryContent, ObituaryType, PersonName, PersonRecord, SourceInfo, SourceType,
};
use crate::domain::services::{calculate_age, parse_mmddyyyy, MAX_AGE};
use crate::utils::error::{PublishError, Result};
use crate::utils::validation::{validate_iso_date, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DRAFT_SOURCE: &str = "ipublish";

/// 使用者填寫的扁平表單，空字串視為未填
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ObituaryDraft {
    pub name_prefix: String,
    pub name_first: String,
    pub name_middle: String,
    pub name_last: String,
    pub name_maiden: String,
    pub name_nickname: String,
    pub name_suffix: String,
    pub date_of_birth: String,
    pub date_of_death: String,
    pub age: Option<u32>,
    pub obituary_text: String,
    pub publish_start_date: String,
    pub publish_end_date: String,
    pub obituary_type: Option<ObituaryType>,
    pub email_address: String,
    pub source_reference_id: String,
    pub provider: String,
    pub provider_reference_id: String,
    pub owner: String,
    pub owner_reference_id: String,
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn required(field: &str, value: &str, message: &str) -> Result<String> {
    non_empty(value).ok_or_else(|| PublishError::validation(field, message))
}

impl ObituaryDraft {
    /// 依副檔名載入 `.toml` 或 `.json` 表單
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(serde_json::from_str(&content)?),
            Some("toml") => toml::from_str(&content).map_err(|e| {
                PublishError::config(format!("Draft TOML parsing error: {}", e))
            }),
            _ => Err(PublishError::config(format!(
                "Unsupported draft file '{}', expected .toml or .json",
                path.display()
            ))),
        }
    }

    fn mmddyyyy(field: &str, value: &str) -> Result<Option<String>> {
        match non_empty(value) {
            Some(date) if parse_mmddyyyy(&date).is_none() => Err(PublishError::validation(
                field,
                format!("'{}' must be in MMDDYYYY format", date),
            )),
            other => Ok(other),
        }
    }

    pub fn into_request(self, default_owner: Option<&str>) -> Result<ObituaryRequest> {
        let first = required("name_first", &self.name_first, "First name is required")?;
        let last = required("name_last", &self.name_last, "Last name is required")?;

        let date_of_birth = Self::mmddyyyy("date_of_birth", &self.date_of_birth)?;
        let date_of_death = Self::mmddyyyy("date_of_death", &self.date_of_death)?;

        let age = match self.age {
            Some(age) => {
                validate_range("age", age, 0, MAX_AGE)?;
                Some(age)
            }
            None => date_of_birth
                .as_deref()
                .zip(date_of_death.as_deref())
                .and_then(|(dob, dod)| calculate_age(dob, dod)),
        };

        let obituary_text = required(
            "obituary_text",
            &self.obituary_text,
            "Obituary text is required",
        )?;
        let publish_start_date = required(
            "publish_start_date",
            &self.publish_start_date,
            "Publish start date is required",
        )?;
        validate_iso_date("publish_start_date", &publish_start_date)?;
        let publish_end_date = non_empty(&self.publish_end_date);
        if let Some(end) = &publish_end_date {
            validate_iso_date("publish_end_date", end)?;
        }

        let source_reference_id = required(
            "source_reference_id",
            &self.source_reference_id,
            "Source reference ID is required",
        )?;

        let source_info = SourceInfo {
            source_type: SourceType::Publisher,
            source: DRAFT_SOURCE.to_string(),
            provider: Some(non_empty(&self.provider).unwrap_or_else(|| DRAFT_SOURCE.to_string())),
            provider_reference_id: Some(
                non_empty(&self.provider_reference_id)
                    .unwrap_or_else(|| source_reference_id.clone()),
            ),
            owner: non_empty(&self.owner).or_else(|| default_owner.and_then(non_empty)),
            owner_reference_id: non_empty(&self.owner_reference_id),
            source_reference_id,
        };
        source_info.validate()?;

        Ok(ObituaryRequest {
            person: PersonRecord {
                name: PersonName {
                    prefix: non_empty(&self.name_prefix),
                    first,
                    middle: non_empty(&self.name_middle),
                    last,
                    maiden: non_empty(&self.name_maiden),
                    nickname: non_empty(&self.name_nickname),
                    suffix: non_empty(&self.name_suffix),
                },
                date_of_birth,
                date_of_death,
                age,
            },
            obituary: ObituaryContent {
                obituary_text,
                publish_start_date,
                publish_end_date,
                obituary_type: self.obituary_type.unwrap_or_default(),
                email_address: non_empty(&self.email_address),
            },
            source_info,
            version: Some(version_stamp()),
        })
    }
}
