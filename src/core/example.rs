use crate::core::ObituaryRequest;
use crate::domain::model::{
    ObituaryContent, ObituaryType, PersonName, PersonRecord, SourceInfo, SourceType,
};
use chrono::{Local, SecondsFormat, Utc};

/// 範例資料：今天作為刊登起始日，目前時間作為版本
pub fn build_example_payload() -> ObituaryRequest {
    let today = Local::now().format("%Y-%m-%d").to_string();

    ObituaryRequest {
        person: PersonRecord {
            name: PersonName {
                middle: Some("Q".to_string()),
                suffix: Some("Jr.".to_string()),
                ..PersonName::new("John", "Doe")
            },
            date_of_birth: Some("01221926".to_string()),
            date_of_death: Some("05152021".to_string()),
            age: Some(95),
        },
        obituary: ObituaryContent {
            obituary_text: "John Q. Doe Jr., 95, passed away peacefully on May 15, 2021. \
                            He was a beloved husband, father, and grandfather. \
                            Services will be held at..."
                .to_string(),
            publish_start_date: today,
            publish_end_date: None,
            obituary_type: ObituaryType::Paid,
            email_address: None,
        },
        source_info: SourceInfo {
            source_type: SourceType::Publisher,
            source: "ipublish".to_string(),
            source_reference_id: "1000".to_string(),
            provider: Some("ipublish".to_string()),
            provider_reference_id: Some("1000".to_string()),
            owner: Some("chicagotribune".to_string()),
            owner_reference_id: Some("a7500".to_string()),
        },
        version: Some(version_stamp()),
    }
}

/// ISO-8601 UTC 時間戳
pub fn version_stamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
