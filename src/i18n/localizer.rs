use anyhow::{anyhow, Result};
use fluent_bundle::{FluentArgs, FluentValue};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::i18n::fluent_loader::FluentLoader;
use crate::i18n::language::SupportedLanguage;

/// A localized string together with the language it was rendered in
#[derive(Debug, Clone, Serialize)]
pub struct LocalizedString {
    value: String,
    language: SupportedLanguage,
}

impl LocalizedString {
    pub fn new(value: String, language: SupportedLanguage) -> Self {
        Self { value, language }
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl fmt::Display for LocalizedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Main localization interface
pub struct Localizer {
    loader: FluentLoader,
    default_language: SupportedLanguage,
}

impl Localizer {
    pub fn new(loader: FluentLoader) -> Self {
        Self {
            loader,
            default_language: SupportedLanguage::default(),
        }
    }

    /// Get a localized message for a specific language, falling back to the
    /// default language bundle when the requested one is not loaded.
    pub fn get_message_with_language(
        &self,
        language: &SupportedLanguage,
        key: &str,
        args: Option<&HashMap<String, FluentValue>>,
    ) -> Result<LocalizedString> {
        let bundle = self
            .loader
            .get_bundle(language)
            .or_else(|| self.loader.get_bundle(&self.default_language))
            .ok_or_else(|| anyhow!("No bundle available for language: {}", language))?;

        let message = bundle
            .get_message(key)
            .ok_or_else(|| anyhow!("Message not found: {}", key))?;

        let pattern = message
            .value()
            .ok_or_else(|| anyhow!("Message has no value: {}", key))?;

        let mut errors = Vec::new();
        let formatted = if let Some(args) = args {
            let mut fluent_args = FluentArgs::new();
            for (k, v) in args {
                fluent_args.set(k.as_str(), v.clone());
            }
            bundle.format_pattern(pattern, Some(&fluent_args), &mut errors)
        } else {
            bundle.format_pattern(pattern, None, &mut errors)
        };

        if !errors.is_empty() {
            tracing::warn!("Fluent formatting errors for key '{}': {:?}", key, errors);
        }

        Ok(LocalizedString::new(formatted.into_owned(), *language))
    }

    /// Get a message for a specific language, or the key itself when missing
    pub fn get_string_for_language(&self, language: &SupportedLanguage, key: &str) -> String {
        self.get_message_with_language(language, key, None)
            .unwrap_or_else(|_| LocalizedString::new(key.to_string(), *language))
            .into_string()
    }

    /// Check if a message exists for a language
    #[cfg(test)]
    pub fn has_message(&self, language: &SupportedLanguage, key: &str) -> bool {
        self.loader
            .get_bundle(language)
            .map(|bundle| bundle.has_message(key))
            .unwrap_or(false)
    }

    pub fn default_language(&self) -> SupportedLanguage {
        self.default_language
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n_args;

    fn localizer() -> Localizer {
        crate::i18n::builtin_localizer().unwrap()
    }

    #[test]
    fn renders_messages_per_language() {
        let localizer = localizer();

        assert_eq!(
            localizer.get_string_for_language(&SupportedLanguage::Portuguese, "weekday-0"),
            "Domingo"
        );
        assert_eq!(
            localizer.get_string_for_language(&SupportedLanguage::English, "weekday-0"),
            "Sunday"
        );
    }

    #[test]
    fn substitutes_arguments_without_isolation_marks() {
        let localizer = localizer();
        let args = i18n_args! { "start" => "08:00", "end" => "18:00" };

        let message = localizer
            .get_message_with_language(&SupportedLanguage::English, "schedule-window", Some(&args))
            .unwrap();

        assert_eq!(message.to_string(), "08:00 to 18:00");
    }

    #[test]
    fn missing_keys_fall_back_to_the_key() {
        let localizer = localizer();

        assert!(!localizer.has_message(&SupportedLanguage::English, "no-such-key"));
        assert_eq!(
            localizer.get_string_for_language(&SupportedLanguage::English, "no-such-key"),
            "no-such-key"
        );
    }

    #[test]
    fn every_validation_failure_is_translated() {
        let localizer = localizer();

        for language in SupportedLanguage::all() {
            for key in crate::availability::ValidationFailure::message_keys() {
                assert!(localizer.has_message(language, key), "{language} lacks {key}");
            }
        }
    }
}
