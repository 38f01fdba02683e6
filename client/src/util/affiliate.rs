//! Affiliate referral capture.
//!
//! Reads `?ref=` from the landing URL, sanitizes it, and stores it in a
//! same-site cookie with a fixed 90-day expiry so later form submissions can
//! credit the referring partner. Capture is write-mostly idempotent:
//! re-capturing the same value just refreshes the expiry, and a value stored
//! on an earlier visit survives page loads without the parameter.

#[cfg(test)]
#[path = "affiliate_test.rs"]
mod tests;

pub const REF_PARAM: &str = "ref";
pub const COOKIE_NAME: &str = "ms_ref";
pub const REF_MAX_LEN: usize = 64;
const REF_TTL_SECONDS: u64 = 90 * 24 * 60 * 60;

/// Restrict a raw referral code to `[A-Za-z0-9_-]`, bounded length.
///
/// Returns `None` when nothing safe remains.
#[must_use]
pub fn sanitize_ref(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .take(REF_MAX_LEN)
        .collect();
    if cleaned.is_empty() { None } else { Some(cleaned) }
}

/// Extract the `ref` value from a query string (`?a=b&ref=x` or `a=b&ref=x`).
///
/// The value is percent-decoded before it is returned, so `Partner%2D123`
/// reads as `Partner-123`. Values that fail to decode are kept raw; the
/// sanitizer strips anything unsafe either way.
#[must_use]
pub fn ref_from_query(query: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    for pair in query.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if key == REF_PARAM && !value.is_empty() {
            let decoded = urlencoding::decode(value)
                .map_or_else(|_| value.to_owned(), std::borrow::Cow::into_owned);
            return Some(decoded);
        }
    }
    None
}

/// Cookie attribute string written for a sanitized referral value.
#[must_use]
pub fn cookie_string(value: &str) -> String {
    format!("{COOKIE_NAME}={value}; Max-Age={REF_TTL_SECONDS}; Path=/; SameSite=Lax; Secure")
}

/// Find the stored referral value in a `Cookie`-header-shaped string.
#[must_use]
pub fn ref_from_cookies(cookies: &str) -> Option<String> {
    for pair in cookies.split(';') {
        let Some((key, value)) = pair.trim().split_once('=') else {
            continue;
        };
        if key == COOKIE_NAME && !value.is_empty() {
            return Some(value.to_owned());
        }
    }
    None
}

/// What a capture pass decided to do; separated from the DOM so it can be
/// exercised without a browser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Capture {
    /// Write (or re-write) this sanitized value.
    Store(String),
    /// No usable parameter; leave any previously stored value alone.
    Skip,
    /// A parameter was present but nothing safe remained after sanitizing.
    Rejected,
}

/// Decide the capture action for a landing query string.
#[must_use]
pub fn capture_from_query(query: &str) -> Capture {
    match ref_from_query(query) {
        None => Capture::Skip,
        Some(raw) => sanitize_ref(&raw).map_or(Capture::Rejected, Capture::Store),
    }
}

/// Run a capture pass against the current location. Browser only.
pub fn capture_current_location() {
    #[cfg(feature = "hydrate")]
    {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let query = document
            .location()
            .and_then(|loc| loc.search().ok())
            .unwrap_or_default();
        match capture_from_query(&query) {
            Capture::Store(value) => {
                use wasm_bindgen::JsCast;
                if let Some(html_doc) = document.dyn_ref::<web_sys::HtmlDocument>() {
                    let _ = html_doc.set_cookie(&cookie_string(&value));
                }
            }
            Capture::Skip => {}
            Capture::Rejected => {
                log::warn!("ignoring referral parameter with no safe characters");
            }
        }
    }
}

/// The stored referral value, if any, for inclusion in form submissions.
#[must_use]
pub fn stored_ref() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;
        let document = web_sys::window().and_then(|w| w.document())?;
        let cookies = document.dyn_ref::<web_sys::HtmlDocument>()?.cookie().ok()?;
        ref_from_cookies(&cookies)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}
