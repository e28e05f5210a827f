//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Returns the content hash for main.css.
///
/// The hash is computed at build time from the CSS file content.
///
/// Usage in templates: `{{ ""|css_hash }}`
#[askama::filter_fn]
pub fn css_hash(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(env!("CSS_HASH"))
}

/// Capitalises the first letter, for status badges.
///
/// Usage in templates: `{{ order.status|title_case }}`
#[askama::filter_fn]
pub fn title_case(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(capitalise(&value.to_string()))
}

/// First letter of a name, upper-cased, for image placeholders.
///
/// Usage in templates: `{{ product.name|initial }}`
#[askama::filter_fn]
pub fn initial(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(value
        .to_string()
        .trim()
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default())
}

fn capitalise(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalise() {
        assert_eq!(capitalise("pending"), "Pending");
        assert_eq!(capitalise("on hold"), "On hold");
        assert_eq!(capitalise(""), "");
    }
}
