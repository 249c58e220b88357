pub mod fluent_loader;
pub mod helpers;
pub mod language;
pub mod localizer;

pub use fluent_loader::FluentLoader;
pub use helpers::I18n;
pub use language::SupportedLanguage;
pub use localizer::{LocalizedString, Localizer};

use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// Initialize the i18n system from the locales directory. A locale that
/// cannot be read from disk is served from the built-in messages.
pub async fn init_i18n(locales_dir: impl AsRef<Path>) -> Result<Localizer> {
    let mut loader = FluentLoader::new(locales_dir.as_ref());

    for language in SupportedLanguage::all() {
        if let Err(e) = loader.load_locale(*language).await {
            warn!(language = %language, error = %e, "Falling back to built-in messages");
            loader.load_builtin(*language)?;
        }
    }

    Ok(Localizer::new(loader))
}

/// Localizer backed only by the messages compiled into the binary
#[cfg(test)]
pub fn builtin_localizer() -> Result<Localizer> {
    let mut loader = FluentLoader::new("locales");

    for language in SupportedLanguage::all() {
        loader.load_builtin(*language)?;
    }

    Ok(Localizer::new(loader))
}

/// Extract a dictionary of key-value pairs for client-side usage
pub fn extract_translations_for_client(
    localizer: &Localizer,
    language: SupportedLanguage,
    keys: &[&str],
) -> HashMap<String, String> {
    let mut translations = HashMap::new();

    for key in keys {
        if let Ok(translation) = localizer.get_message_with_language(&language, key, None) {
            translations.insert(key.to_string(), translation.into_string());
        }
    }

    translations
}
