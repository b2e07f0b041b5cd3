//! Sentinel tag recognition and the iframe replacement template.
//!
//! The sentinel appears in chat text either raw or HTML-entity-escaped,
//! depending on whether an upstream render step already decoded it. Both
//! forms mean the same thing.

/// Raw open form of the sentinel tag.
pub const TAG_OPEN: &str = "<fphone>";
/// Raw close form.
pub const TAG_CLOSE: &str = "</fphone>";
/// HTML-entity-escaped open form, as typed literally into chat text.
pub const TAG_OPEN_ESCAPED: &str = "&lt;fphone&gt;";
/// HTML-entity-escaped close form.
pub const TAG_CLOSE_ESCAPED: &str = "&lt;/fphone&gt;";

/// True when the raw text carries the sentinel in any form.
pub fn contains_sentinel(text: &str) -> bool {
    [TAG_OPEN_ESCAPED, TAG_CLOSE_ESCAPED, TAG_OPEN, TAG_CLOSE]
        .iter()
        .any(|form| text.contains(form))
}

/// The fixed iframe wrapper every sentinel occurrence is replaced with,
/// parameterized by the configured embedded-page URL. Markup matches the
/// stock extension: 375x680, rounded corners, clipboard-write allowed.
pub fn iframe_markup(phone_url: &str) -> String {
    format!(
        "<iframe src=\"{phone_url}\" style=\"width: 375px; height: 680px; \
         border:none; user-select:none; border-radius: 20px; margin: 0 auto; \
         display: block;\" allow=\"clipboard-write\"></iframe>"
    )
}
