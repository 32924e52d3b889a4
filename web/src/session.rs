//! Session-token storage.
//!
//! The backend issues an opaque token at register/login; the browser keeps
//! it in a cookie named `cookie`. This module is the only place that touches
//! `document.cookie`.

const COOKIE_NAME: &str = "cookie";

/// The stored session token, if any.
pub fn get() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        if let Some(header) = raw_cookies() {
            return token_from_cookie_header(&header);
        }
    }

    None
}

/// Stores a freshly issued token.
pub fn set(token: &str) {
    #[cfg(feature = "hydrate")]
    if let Some(document) = html_document() {
        let _ = document.set_cookie(&format!(
            "{}={}; SameSite=None; Secure; path=/",
            COOKIE_NAME, token
        ));
    }

    #[cfg(not(feature = "hydrate"))]
    let _ = token;
}

/// Drops the stored token.
pub fn clear() {
    #[cfg(feature = "hydrate")]
    if let Some(document) = html_document() {
        let _ = document.set_cookie(&format!(
            "{}=; Max-Age=0; SameSite=None; Secure; path=/",
            COOKIE_NAME
        ));
    }
}

fn token_from_cookie_header(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix(COOKIE_NAME)?.strip_prefix('='))
        .map(str::to_string)
        .filter(|token| !token.is_empty())
}

#[cfg(feature = "hydrate")]
fn raw_cookies() -> Option<String> {
    html_document().and_then(|document| document.cookie().ok())
}

#[cfg(feature = "hydrate")]
fn html_document() -> Option<web_sys::HtmlDocument> {
    use wasm_bindgen::JsCast;

    web_sys::window()?
        .document()?
        .dyn_into::<web_sys::HtmlDocument>()
        .ok()
}
