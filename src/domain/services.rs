use crate::domain::model::{ObituaryRequest, SourceInfo, SourceType};
use crate::utils::error::{PublishError, Result};
use crate::utils::validation::{
    validate_iso_date, validate_non_empty_string, validate_required_field, Validate,
};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

pub const MAX_AGE: u32 = 150;

fn mmddyyyy_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(0[1-9]|1[0-2]|00)(0[1-9]|[12][0-9]|3[01]|00)((?:1[7-9]|20)\d{2})$")
            .expect("static MMDDYYYY pattern")
    })
}

/// MMDDYYYY 日期，月或日為 0 表示未知
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialDate {
    pub month: u32,
    pub day: u32,
    pub year: i32,
}

impl PartialDate {
    pub fn is_partial(&self) -> bool {
        self.month == 0 || self.day == 0
    }

    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        if self.is_partial() {
            return None;
        }
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

pub fn parse_mmddyyyy(value: &str) -> Option<PartialDate> {
    let caps = mmddyyyy_pattern().captures(value)?;
    Some(PartialDate {
        month: caps[1].parse().ok()?,
        day: caps[2].parse().ok()?,
        year: caps[3].parse().ok()?,
    })
}

/// 由出生與死亡日期推算年齡；任一日期不完整時僅以年份相減
pub fn calculate_age(date_of_birth: &str, date_of_death: &str) -> Option<u32> {
    let dob = parse_mmddyyyy(date_of_birth)?;
    let dod = parse_mmddyyyy(date_of_death)?;

    let age = if dob.is_partial() || dod.is_partial() {
        dod.year - dob.year
    } else {
        let birth = dob.to_naive_date()?;
        let death = dod.to_naive_date()?;
        if death < birth {
            return None;
        }

        let mut age = dod.year - dob.year;
        if (dod.month, dod.day) < (dob.month, dob.day) {
            age -= 1;
        }
        age
    };

    u32::try_from(age).ok().filter(|age| *age <= MAX_AGE)
}

impl Validate for SourceInfo {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("source_info.source", &self.source)?;
        validate_non_empty_string(
            "source_info.source_reference_id",
            &self.source_reference_id,
        )?;

        if self.source_type == SourceType::Publisher {
            for (field, value) in self.publisher_fields() {
                validate_non_empty_string(field, validate_required_field(field, value)?)?;
            }
        }
        Ok(())
    }
}

impl Validate for ObituaryRequest {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("person.name.first", &self.person.name.first)?;
        validate_non_empty_string("person.name.last", &self.person.name.last)?;

        for (field, value) in [
            ("person.date_of_birth", &self.person.date_of_birth),
            ("person.date_of_death", &self.person.date_of_death),
        ] {
            if let Some(date) = value {
                if parse_mmddyyyy(date).is_none() {
                    return Err(PublishError::validation(
                        field,
                        format!("'{}' must be in MMDDYYYY format", date),
                    ));
                }
            }
        }

        if let Some(age) = self.person.age {
            crate::utils::validation::validate_range("person.age", age, 0, MAX_AGE)?;
        }

        validate_non_empty_string("obituary.obituary_text", &self.obituary.obituary_text)?;
        validate_iso_date(
            "obituary.publish_start_date",
            &self.obituary.publish_start_date,
        )?;
        if let Some(end) = &self.obituary.publish_end_date {
            validate_iso_date("obituary.publish_end_date", end)?;
        }

        self.source_info.validate()
    }
}
