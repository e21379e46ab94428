//! Common utilities for provider adapters
//!
//! Helpers that keep credentials out of logs, `Debug` output and error text.

/// Minimum key length to display partial key
const MIN_KEY_LENGTH_FOR_PARTIAL_DISPLAY: usize = 8;

/// Number of characters to show at start/end of masked key
const KEY_MASK_VISIBLE_CHARS: usize = 4;

/// Mask API key for safe display in logs
///
/// Shows first 4 and last 4 characters for keys longer than 8 characters,
/// otherwise shows "****" to prevent exposure of short keys.
///
/// # Examples
/// ```
/// use glorpi_llm::util::mask_api_key;
/// assert_eq!(mask_api_key("sk-1234567890abcdef"), "sk-1...cdef");
/// assert_eq!(mask_api_key("short"), "****");
/// ```
#[must_use]
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= MIN_KEY_LENGTH_FOR_PARTIAL_DISPLAY {
        return "****".to_string();
    }
    let head: String = chars[..KEY_MASK_VISIBLE_CHARS].iter().collect();
    let tail: String = chars[chars.len() - KEY_MASK_VISIBLE_CHARS..].iter().collect();
    format!("{head}...{tail}")
}

/// Replace every occurrence of `secret` in `text` with its masked form
#[must_use]
pub fn redact_secret(text: &str, secret: &str) -> String {
    if secret.is_empty() || !text.contains(secret) {
        return text.to_string();
    }
    text.replace(secret, &mask_api_key(secret))
}

/// Mask the value of a `key=` query parameter in a URL
#[must_use]
pub fn mask_url_key(url: &str) -> String {
    let Some(start) = url.find("key=").map(|i| i + "key=".len()) else {
        return url.to_string();
    };
    let end = url[start..]
        .find('&')
        .map_or(url.len(), |offset| start + offset);
    format!("{}{}{}", &url[..start], mask_api_key(&url[start..end]), &url[end..])
}

/// `None` for missing or blank strings
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Base URL with trailing slashes removed; root-only or blank values are absent
pub(crate) fn non_empty_url(value: Option<String>) -> Option<String> {
    non_empty(value.map(|v| v.trim().trim_end_matches('/').to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_api_key_long() {
        let key = "sk-1234567890abcdefghij";
        let masked = mask_api_key(key);
        assert_eq!(masked, "sk-1...ghij");
        assert!(!masked.contains("567890"));
    }

    #[test]
    fn test_mask_api_key_short() {
        assert_eq!(mask_api_key("short"), "****");
        assert_eq!(mask_api_key("12345678"), "****");
        assert_eq!(mask_api_key(""), "****");
    }

    #[test]
    fn test_mask_api_key_multibyte() {
        assert_eq!(mask_api_key("ключ-1234567890"), "ключ...7890");
    }

    #[test]
    fn test_non_empty_url() {
        assert_eq!(non_empty_url(Some("/".to_string())), None);
        assert_eq!(non_empty_url(Some(" /// ".to_string())), None);
        assert_eq!(non_empty_url(None), None);
        assert_eq!(
            non_empty_url(Some("http://localhost:8000/v1/".to_string())).as_deref(),
            Some("http://localhost:8000/v1")
        );
    }

    #[test]
    fn test_redact_secret() {
        let secret = "AIzaSyD-1234567890abcdef";
        let text = format!("API key not valid: {secret}. Please pass a valid key.");
        let redacted = redact_secret(&text, secret);
        assert!(!redacted.contains(secret));
        assert!(redacted.contains("AIza...cdef"));
        assert_eq!(redact_secret("nothing here", secret), "nothing here");
        assert_eq!(redact_secret("text", ""), "text");
    }

    #[test]
    fn test_mask_url_key() {
        assert_eq!(
            mask_url_key("https://x/models/m:generateContent?key=AIzaSyD-1234567890abcdef"),
            "https://x/models/m:generateContent?key=AIza...cdef"
        );
        assert_eq!(
            mask_url_key("https://x?key=abcdefghijkl&alt=sse"),
            "https://x?key=abcd...ijkl&alt=sse"
        );
        assert_eq!(mask_url_key("https://x/v1"), "https://x/v1");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("  ".to_string())), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("k".to_string())), Some("k".to_string()));
    }
}
