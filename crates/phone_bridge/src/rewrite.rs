use std::sync::OnceLock;

use regex::{NoExpand, Regex};

use phone_core::iframe_markup;

/// One alternation covering every sentinel form. Order matters: pairs
/// first so a well-formed pair (content discarded) becomes a single
/// iframe, then lone opens so an unterminated tag still rewrites, then
/// stray closes.
fn sentinel_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?s)&lt;fphone&gt;.*?&lt;/fphone&gt;|<fphone>.*?</fphone>|&lt;fphone&gt;|<fphone>|&lt;/fphone&gt;|</fphone>",
        )
        .expect("sentinel pattern")
    })
}

/// Replace every sentinel occurrence in one sweep with the iframe wrapper
/// for `phone_url`. Returns `None` when nothing matched, which keeps the
/// rewrite from re-triggering itself through the same change feed: the
/// produced markup contains no sentinel, so a second pass is a no-op.
pub fn rewrite_markup(html: &str, phone_url: &str) -> Option<String> {
    let pattern = sentinel_pattern();
    if !pattern.is_match(html) {
        return None;
    }
    let replacement = iframe_markup(phone_url);
    Some(pattern.replace_all(html, NoExpand(&replacement)).into_owned())
}
