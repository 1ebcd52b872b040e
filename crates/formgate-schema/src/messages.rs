//! # Structural Error Messages
//!
//! Localized wording for the built-in structural checks. Refinement rules
//! carry their own fixed message and are not localized here.

use std::str::FromStr;

use crate::error::SchemaError;

/// Language used for structural error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// Korean.
    Ko,
}

impl FromStr for Locale {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "ko" => Ok(Self::Ko),
            _ => Err(SchemaError::UnknownLocale(s.to_string())),
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::En => "en",
            Self::Ko => "ko",
        })
    }
}

/// A structural check failure, before rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageKey<'a> {
    Required,
    ExpectedObject,
    ExpectedText,
    ExpectedInteger,
    ExpectedNumber,
    ExpectedBoolean,
    InvalidUuid,
    TooShort { min: usize },
    TooLong { max: usize },
    TooSmall { min: String },
    TooLarge { max: String },
    InvalidOption { options: &'a [String] },
}

impl MessageKey<'_> {
    /// Render the message in the given locale.
    pub fn render(&self, locale: Locale) -> String {
        match locale {
            Locale::En => self.render_en(),
            Locale::Ko => self.render_ko(),
        }
    }

    fn render_en(&self) -> String {
        match self {
            Self::Required => "required".to_string(),
            Self::ExpectedObject => "expected an object".to_string(),
            Self::ExpectedText => "expected a string".to_string(),
            Self::ExpectedInteger => "expected an integer".to_string(),
            Self::ExpectedNumber => "expected a number".to_string(),
            Self::ExpectedBoolean => "expected a boolean".to_string(),
            Self::InvalidUuid => "invalid UUID".to_string(),
            Self::TooShort { min } => format!("must contain at least {min} character(s)"),
            Self::TooLong { max } => format!("must contain at most {max} character(s)"),
            Self::TooSmall { min } => format!("must be at least {min}"),
            Self::TooLarge { max } => format!("must be at most {max}"),
            Self::InvalidOption { options } => format!("expected one of: {}", options.join(", ")),
        }
    }

    fn render_ko(&self) -> String {
        match self {
            Self::Required => "필수 항목입니다".to_string(),
            Self::ExpectedObject => "잘못된 입력: 객체가 필요합니다".to_string(),
            Self::ExpectedText => "잘못된 입력: 문자열이 필요합니다".to_string(),
            Self::ExpectedInteger => "잘못된 입력: 정수가 필요합니다".to_string(),
            Self::ExpectedNumber => "잘못된 입력: 숫자가 필요합니다".to_string(),
            Self::ExpectedBoolean => "잘못된 입력: 불리언이 필요합니다".to_string(),
            Self::InvalidUuid => "잘못된 UUID 형식입니다".to_string(),
            Self::TooShort { min } => format!("너무 짧습니다: {min}자 이상이어야 합니다"),
            Self::TooLong { max } => format!("너무 깁니다: {max}자 이하여야 합니다"),
            Self::TooSmall { min } => format!("너무 작습니다: {min} 이상이어야 합니다"),
            Self::TooLarge { max } => format!("너무 큽니다: {max} 이하여야 합니다"),
            Self::InvalidOption { options } => {
                format!("잘못된 선택: {} 중 하나여야 합니다", options.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_parses_case_insensitively() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("KO".parse::<Locale>().unwrap(), Locale::Ko);
        assert!(matches!(
            "fr".parse::<Locale>(),
            Err(SchemaError::UnknownLocale(s)) if s == "fr"
        ));
    }

    #[test]
    fn renders_bounds() {
        assert_eq!(
            MessageKey::TooShort { min: 3 }.render(Locale::En),
            "must contain at least 3 character(s)"
        );
        assert_eq!(
            MessageKey::TooShort { min: 3 }.render(Locale::Ko),
            "너무 짧습니다: 3자 이상이어야 합니다"
        );
    }

    #[test]
    fn renders_options() {
        let options = vec!["red".to_string(), "blue".to_string()];
        assert_eq!(
            MessageKey::InvalidOption { options: &options }.render(Locale::En),
            "expected one of: red, blue"
        );
    }
}
