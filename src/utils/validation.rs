use crate::utils::error::{MedalError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(MedalError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(MedalError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(MedalError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// Checks `path` ends in one of `allowed_extensions` (case-insensitive).
pub fn validate_file_extension(field_name: &str, path: &str, allowed_extensions: &[&str]) -> Result<()> {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension {
        Some(ext) if allowed_extensions.contains(&ext.as_str()) => Ok(()),
        Some(ext) => Err(MedalError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                ext,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(MedalError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| MedalError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MedalError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_placeholders(field_name: &str, placeholders: &[String]) -> Result<()> {
    if placeholders.is_empty() {
        return Err(MedalError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    for placeholder in placeholders {
        validate_non_empty_string(field_name, placeholder)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("template", "medals.docx").is_ok());
        assert!(validate_path("template", "").is_err());
        assert!(validate_path("template", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("concurrency", 4, 1).is_ok());
        assert!(validate_positive_number("concurrency", 0, 1).is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("excel", "listm.xlsx", &["xlsx", "csv"]).is_ok());
        assert!(validate_file_extension("excel", "LISTM.XLSX", &["xlsx", "csv"]).is_ok());
        assert!(validate_file_extension("excel", "names.csv", &["xlsx", "csv"]).is_ok());
        assert!(validate_file_extension("excel", "names.xls", &["xlsx", "csv"]).is_err());
        assert!(validate_file_extension("excel", "names", &["xlsx", "csv"]).is_err());
    }

    #[test]
    fn test_validate_placeholders() {
        assert!(validate_placeholders("placeholder", &["Гуров".to_string()]).is_ok());
        assert!(validate_placeholders("placeholder", &[]).is_err());
        assert!(validate_placeholders("placeholder", &["  ".to_string()]).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let sheet: Option<String> = None;
        assert!(validate_required_field("sheet", &sheet).is_err());
        let sheet = Some("Аркуш1".to_string());
        assert_eq!(validate_required_field("sheet", &sheet).unwrap(), "Аркуш1");
    }
}
