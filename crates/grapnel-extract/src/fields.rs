//! Field-level extraction primitives.
//!
//! Each helper walks an ordered candidate-selector list and returns the
//! first usable match. Per-selector failures (unsupported syntax, no match,
//! empty text) are swallowed and treated as "no match" so that parsing
//! continues even when the surrounding site changes its markup.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Selector};

static LEADING_INT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9][0-9,]*)").expect("valid regex"));

/// Extract the trimmed text content of the first candidate selector that
/// matches an element with non-empty text. Pure read; exhaustion -> `None`.
#[must_use]
pub fn extract_text(scope: &ElementRef<'_>, candidates: &[String]) -> Option<String> {
    for candidate in candidates {
        let Ok(selector) = Selector::parse(candidate) else {
            continue;
        };
        for element in scope.select(&selector) {
            let text = element.text().collect::<String>().trim().to_string();
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// Attribute analogue of [`extract_text`]: the first candidate selector
/// matching an element that carries a non-empty `attr` wins.
#[must_use]
pub fn extract_attr(scope: &ElementRef<'_>, candidates: &[String], attr: &str) -> Option<String> {
    for candidate in candidates {
        let Ok(selector) = Selector::parse(candidate) else {
            continue;
        };
        for element in scope.select(&selector) {
            if let Some(value) = element.value().attr(attr) {
                let value = value.trim();
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

/// Boolean presence check: does any candidate selector match at all?
/// Used for badge detection, where existence of the element is the signal.
#[must_use]
pub fn element_present(scope: &ElementRef<'_>, candidates: &[String]) -> bool {
    candidates.iter().any(|candidate| {
        Selector::parse(candidate)
            .map(|selector| scope.select(&selector).next().is_some())
            .unwrap_or(false)
    })
}

/// First element matched by any candidate selector, in candidate order.
#[must_use]
pub fn first_element<'a>(
    scope: &ElementRef<'a>,
    candidates: &[String],
) -> Option<ElementRef<'a>> {
    for candidate in candidates {
        let Ok(selector) = Selector::parse(candidate) else {
            continue;
        };
        if let Some(element) = scope.select(&selector).next() {
            return Some(element);
        }
    }
    None
}

/// All elements matched by the first candidate selector that matches
/// anything. Later candidates are fallbacks for redesigned markup, so they
/// are only consulted when earlier ones produce zero matches.
#[must_use]
pub fn select_items<'a>(
    scope: &ElementRef<'a>,
    candidates: &[String],
) -> Vec<ElementRef<'a>> {
    for candidate in candidates {
        let Ok(selector) = Selector::parse(candidate) else {
            continue;
        };
        let items: Vec<_> = scope.select(&selector).collect();
        if !items.is_empty() {
            return items;
        }
    }
    Vec::new()
}

/// Pull the leading integer out of a free-text count label, stripping
/// thousands separators ("1,234 followers" -> 1234, "500+ connections"
/// -> 500). Unparsable text yields `None`, never an error.
#[must_use]
pub fn leading_count(text: &str) -> Option<u64> {
    let captures = LEADING_INT.captures(text)?;
    captures.get(1)?.as_str().replace(',', "").parse().ok()
}
