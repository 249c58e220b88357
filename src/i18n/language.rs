use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;
use unic_langid::{langid, LanguageIdentifier};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupportedLanguage {
    #[default]
    #[serde(rename = "pt-BR")]
    Portuguese,
    #[serde(rename = "en")]
    English,
}

impl SupportedLanguage {
    /// Get all supported languages
    pub fn all() -> &'static [SupportedLanguage] {
        &[SupportedLanguage::Portuguese, SupportedLanguage::English]
    }

    /// Get the language code as a string
    pub fn code(&self) -> &'static str {
        match self {
            SupportedLanguage::Portuguese => "pt-BR",
            SupportedLanguage::English => "en",
        }
    }

    /// Get the language identifier for Fluent
    pub fn lang_id(&self) -> LanguageIdentifier {
        match self {
            SupportedLanguage::Portuguese => langid!("pt-BR"),
            SupportedLanguage::English => langid!("en-US"),
        }
    }

    /// Get the human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            SupportedLanguage::Portuguese => "Português (Brasil)",
            SupportedLanguage::English => "English",
        }
    }

    /// Parse from Accept-Language header
    pub fn from_accept_language(accept_language: &str) -> Self {
        for lang_part in accept_language.split(',') {
            let lang = lang_part.trim().split(';').next().unwrap_or("");
            let lang = lang.to_lowercase();

            if lang.starts_with("pt") {
                return SupportedLanguage::Portuguese;
            } else if lang.starts_with("en") {
                return SupportedLanguage::English;
            }
        }

        Self::default()
    }
}

impl Display for SupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for SupportedLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pt" | "pt-br" | "portuguese" | "português" => Ok(SupportedLanguage::Portuguese),
            "en" | "en-us" | "english" => Ok(SupportedLanguage::English),
            _ => Err(format!("Unsupported language: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_first_supported_accept_language() {
        assert_eq!(
            SupportedLanguage::from_accept_language("fr-FR,en;q=0.8,pt;q=0.5"),
            SupportedLanguage::English
        );
        assert_eq!(
            SupportedLanguage::from_accept_language("pt-BR,pt;q=0.9"),
            SupportedLanguage::Portuguese
        );
        assert_eq!(
            SupportedLanguage::from_accept_language("de-DE"),
            SupportedLanguage::Portuguese
        );
    }

    #[test]
    fn parses_language_codes() {
        assert_eq!("EN".parse(), Ok(SupportedLanguage::English));
        assert_eq!("pt-br".parse(), Ok(SupportedLanguage::Portuguese));
        assert!("tr".parse::<SupportedLanguage>().is_err());
    }
}
