use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::app_state::AppState;
use crate::availability::ValidationFailure;
use crate::i18n::{extract_translations_for_client, I18n, SupportedLanguage};

#[derive(Debug, Deserialize)]
pub struct TranslationQuery {
    pub keys: Option<String>, // Comma-separated list of keys
    pub language: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LanguageInfo {
    pub code: String,
    pub name: String,
    pub is_default: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SupportedLanguagesResponse {
    pub languages: Vec<LanguageInfo>,
    pub default_language: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranslationsResponse {
    pub translations: HashMap<String, String>,
    pub language: String,
    pub requested_keys: Vec<String>,
}

impl From<SupportedLanguage> for LanguageInfo {
    fn from(language: SupportedLanguage) -> Self {
        Self {
            code: language.code().to_string(),
            name: language.name().to_string(),
            is_default: language == SupportedLanguage::default(),
        }
    }
}

/// Get all supported languages
pub async fn get_supported_languages(State(state): State<AppState>) -> Json<SupportedLanguagesResponse> {
    Json(SupportedLanguagesResponse {
        languages: SupportedLanguage::all().iter().copied().map(LanguageInfo::from).collect(),
        default_language: state.localizer.default_language().code().to_string(),
    })
}

/// Get translations for specific keys.
///
/// Without `keys`, returns the weekday names and the availability
/// validation messages.
pub async fn get_translations(
    State(state): State<AppState>,
    i18n: I18n,
    Query(query): Query<TranslationQuery>,
) -> Json<TranslationsResponse> {
    let language = query
        .language
        .and_then(|lang_str| lang_str.parse::<SupportedLanguage>().ok())
        .unwrap_or(i18n.language());

    let keys: Vec<String> = match query.keys {
        Some(keys_str) => keys_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        None => (0..7)
            .map(|week_day| format!("weekday-{}", week_day))
            .chain(ValidationFailure::message_keys().iter().map(|key| key.to_string()))
            .collect(),
    };

    let key_refs: Vec<&str> = keys.iter().map(|s| s.as_str()).collect();
    let translations = extract_translations_for_client(&state.localizer, language, &key_refs);

    Json(TranslationsResponse {
        translations,
        language: language.code().to_string(),
        requested_keys: keys,
    })
}

/// Get current language information
pub async fn get_current_language(i18n: I18n) -> Json<LanguageInfo> {
    Json(LanguageInfo::from(i18n.language()))
}
