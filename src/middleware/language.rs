use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};

use crate::i18n::SupportedLanguage;

/// Language detection middleware that extracts language preference from headers
pub async fn language_middleware(mut request: Request, next: Next) -> Response {
    let language = detect_language_from_headers(request.headers());

    request.extensions_mut().insert(language);

    next.run(request).await
}

/// `X-Language` wins over `Accept-Language`; Portuguese otherwise.
fn detect_language_from_headers(headers: &HeaderMap) -> SupportedLanguage {
    if let Some(lang_header) = headers.get("X-Language") {
        if let Ok(lang_str) = lang_header.to_str() {
            if let Ok(language) = lang_str.parse::<SupportedLanguage>() {
                return language;
            }
        }
    }

    if let Some(accept_language) = headers.get("Accept-Language") {
        if let Ok(accept_language_str) = accept_language.to_str() {
            return SupportedLanguage::from_accept_language(accept_language_str);
        }
    }

    SupportedLanguage::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn explicit_header_beats_accept_language() {
        let mut headers = HeaderMap::new();
        headers.insert("Accept-Language", HeaderValue::from_static("pt-BR"));
        headers.insert("X-Language", HeaderValue::from_static("en"));

        assert_eq!(detect_language_from_headers(&headers), SupportedLanguage::English);
    }

    #[test]
    fn unparseable_explicit_header_falls_through() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Language", HeaderValue::from_static("klingon"));
        headers.insert("Accept-Language", HeaderValue::from_static("en-GB,en;q=0.9"));

        assert_eq!(detect_language_from_headers(&headers), SupportedLanguage::English);
    }

    #[test]
    fn defaults_to_portuguese() {
        assert_eq!(
            detect_language_from_headers(&HeaderMap::new()),
            SupportedLanguage::Portuguese
        );
    }
}
