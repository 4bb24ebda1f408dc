use crate::utils::error::{PublishError, Result};
use chrono::NaiveDate;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(PublishError::validation(field_name, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(PublishError::validation(
                field_name,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(PublishError::validation(
            field_name,
            format!("Invalid URL format: {}", e),
        )),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PublishError::validation(
            field_name,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| PublishError::validation(field_name, "Field is required"))
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(PublishError::validation(
            field_name,
            format!("Value {} must be between {} and {}", value, min, max),
        ));
    }
    Ok(())
}

/// YYYY-MM-DD 日曆日期
pub fn validate_iso_date(field_name: &str, value: &str) -> Result<()> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| {
            PublishError::validation(
                field_name,
                format!("'{}' must be in YYYY-MM-DD format", value),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("base_url", "https://example.com").is_ok());
        assert!(validate_url("base_url", "http://127.0.0.1:8080").is_ok());
        assert!(validate_url("base_url", "").is_err());
        assert!(validate_url("base_url", "invalid-url").is_err());
        assert!(validate_url("base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_iso_date() {
        assert!(validate_iso_date("publish_start_date", "2021-05-20").is_ok());
        assert!(validate_iso_date("publish_start_date", "2021-02-30").is_err());
        assert!(validate_iso_date("publish_start_date", "05/20/2021").is_err());
    }

    #[test]
    fn test_validate_range_and_required() {
        assert!(validate_range("age", 95, 0, 150).is_ok());
        assert!(validate_range("age", 151, 0, 150).is_err());
        assert!(validate_required_field::<String>("owner", &None).is_err());
        assert!(validate_non_empty_string("api_key", "   ").is_err());
    }
}
