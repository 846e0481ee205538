// src/types/language.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display languages offered by the builder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ko,
    #[default]
    En,
    Ja,
    Zh,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::Ko, Language::En, Language::Ja, Language::Zh];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Ko => "ko",
            Self::En => "en",
            Self::Ja => "ja",
            Self::Zh => "zh",
        }
    }

    /// Accepts a bare code or a locale such as `ja-JP` / `zh_CN.UTF-8`.
    pub fn from_locale(locale: &str) -> Option<Self> {
        let primary = locale
            .split(|c| c == '-' || c == '_' || c == '.')
            .next()
            .unwrap_or("")
            .to_lowercase();
        Self::ALL.into_iter().find(|l| l.code() == primary)
    }

    /// Stored choice first, then the host locale, then English.
    pub fn detect(stored: Option<&str>, locale: Option<&str>) -> Self {
        stored
            .and_then(Self::from_locale)
            .or_else(|| locale.and_then(Self::from_locale))
            .unwrap_or_default()
    }

    /// Gallery timestamp, in the local conventions of the language.
    pub fn format_timestamp(&self, at: &DateTime<Utc>) -> String {
        let pattern = match self {
            Self::Ko => "%Y. %-m. %-d. %H:%M",
            Self::En => "%b %-d, %Y, %I:%M %p",
            Self::Ja => "%Y/%m/%d %H:%M",
            Self::Zh => "%Y/%m/%d %H:%M",
        };
        at.format(pattern).to_string()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_locale(s.trim())
            .ok_or_else(|| anyhow::anyhow!("Unsupported language: {}. Use ko, en, ja or zh", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_prefers_stored_code() {
        assert_eq!(Language::detect(Some("ja"), Some("ko_KR.UTF-8")), Language::Ja);
        assert_eq!(Language::detect(None, Some("ko_KR.UTF-8")), Language::Ko);
        assert_eq!(Language::detect(Some("fr"), Some("zh-CN")), Language::Zh);
        assert_eq!(Language::detect(None, Some("de_DE")), Language::En);
        assert_eq!(Language::detect(None, None), Language::En);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("ZH".parse::<Language>().unwrap(), Language::Zh);
        assert!("klingon".parse::<Language>().is_err());
    }

    #[test]
    fn test_format_timestamp() {
        let at = DateTime::parse_from_rfc3339("2024-03-01T15:04:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(Language::En.format_timestamp(&at), "Mar 1, 2024, 03:04 PM");
        assert_eq!(Language::Ja.format_timestamp(&at), "2024/03/01 15:04");
    }
}
