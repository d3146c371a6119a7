//! Per-field extractors and value normalization.
//!
//! Each extractor walks its selector chain, probing selectors in order and
//! moving on whenever a match produces no usable text. Nothing here is
//! fatal: a field that cannot be resolved degrades to the "N/A" sentinel.

use std::sync::LazyLock;

use regex::Regex;

use crate::dom::{self, Selection};
use crate::record::NOT_AVAILABLE;
use crate::selectors::{select_first, SelectorChain, PRICE_FRACTION_SELECTOR};

/// Strips everything except digits, dots and commas from raw price text.
#[allow(clippy::expect_used)]
static PRICE_STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\d.,]+").expect("PRICE_STRIP regex"));

/// First decimal-number substring inside raw rating text.
#[allow(clippy::expect_used)]
static DECIMAL_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.?\d*)").expect("DECIMAL_NUMBER regex"));

/// Class tokens marking an active/filled star icon inside a rating widget.
#[allow(clippy::expect_used)]
static STAR_MARK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)fa-star|active|filled").expect("STAR_MARK regex"));

// =============================================================================
// Name
// =============================================================================

/// First non-empty trimmed text found by the name chain, else "N/A".
#[must_use]
pub fn extract_name(container: &Selection, chain: &SelectorChain) -> String {
    for selector in chain.iter() {
        if let Some(element) = select_first(container, selector) {
            let name = dom::text_trimmed(&element);
            if !name.is_empty() {
                return name;
            }
        }
    }
    NOT_AVAILABLE.to_string()
}

// =============================================================================
// Price
// =============================================================================

/// Resolve and normalize the price field, else "N/A".
#[must_use]
pub fn extract_price(container: &Selection, chain: &SelectorChain) -> String {
    match raw_price_text(container, chain) {
        Some(raw) if raw != NOT_AVAILABLE => normalize_price(&raw),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Locate raw price text, applying the display-specific special cases.
fn raw_price_text(container: &Selection, chain: &SelectorChain) -> Option<String> {
    for selector in chain.iter() {
        let Some(element) = select_first(container, selector) else {
            continue;
        };
        let classes = dom::class_tokens(&element);
        let is_span = dom::tag_name(&element).as_deref() == Some("span");

        let candidate = if classes.iter().any(|c| c == "a-offscreen") {
            // Off-screen price marker: the visually hidden text is already
            // the complete price.
            dom::text_trimmed(&element)
        } else if is_span && classes.iter().any(|c| c == "a-price-whole" || c == "price") {
            // Split whole/fraction display: join with the sibling fraction
            // part when one exists.
            let whole = dom::text_trimmed(&element);
            let fraction = select_first(container, PRICE_FRACTION_SELECTOR)
                .map(|f| dom::text_trimmed(&f))
                .unwrap_or_default();
            if fraction.is_empty() {
                whole
            } else {
                format!("{whole}{fraction}")
            }
        } else {
            dom::text_trimmed(&element)
        };

        if !candidate.is_empty() {
            return Some(candidate);
        }
    }
    None
}

/// Normalize raw price text to a bare numeric string.
///
/// Keeps only digits, dots and commas, then disambiguates separators:
/// more than one comma alongside a dot means commas are thousands
/// separators; more than one dot alongside a comma means European-style
/// grouping. The one-dot-one-comma case deliberately passes through
/// unchanged.
#[must_use]
pub fn normalize_price(raw: &str) -> String {
    let mut price = PRICE_STRIP.replace_all(raw, "").trim().to_string();
    let commas = price.matches(',').count();
    let dots = price.matches('.').count();

    if commas > 1 && dots >= 1 {
        price = price.replace(',', "");
    } else if dots > 1 && commas >= 1 {
        price = price.replace('.', "").replace(',', ".");
    } else if price.starts_with('.') {
        price.insert(0, '0');
    }
    price
}

// =============================================================================
// Rating
// =============================================================================

/// Resolve and normalize the rating field, else "N/A".
///
/// Raw rating text is reduced to its first decimal-number substring when
/// one exists; otherwise the raw text is kept verbatim.
#[must_use]
pub fn extract_rating(container: &Selection, chain: &SelectorChain) -> String {
    match raw_rating_text(container, chain) {
        Some(raw) if raw != NOT_AVAILABLE => DECIMAL_NUMBER
            .find(&raw)
            .map_or(raw.clone(), |m| m.as_str().to_string()),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Locate raw rating text, applying the widget-specific special cases.
fn raw_rating_text(container: &Selection, chain: &SelectorChain) -> Option<String> {
    for selector in chain.iter() {
        let Some(element) = select_first(container, selector) else {
            continue;
        };
        let classes = dom::class_tokens(&element);

        let candidate = if classes.iter().any(|c| c == "star-rating") {
            // Word-classed star widget: the second class token names the
            // rating. A widget with no second token keeps the chain going.
            match classes.get(1) {
                Some(word) => Some(star_word_to_digit(word)),
                None => None,
            }
        } else if classes.iter().any(|c| c == "a-icon-alt") {
            Some(dom::text_trimmed(&element))
        } else if classes.iter().any(|c| c == "rating")
            && dom::tag_name(&element).as_deref() == Some("div")
        {
            let stars = count_marked_stars(&element);
            if stars > 0 {
                Some(format!("{stars} stars"))
            } else {
                Some(dom::text_trimmed(&element))
            }
        } else {
            Some(dom::text_trimmed(&element))
        };

        if let Some(candidate) = candidate {
            if !candidate.is_empty() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Map a star-rating class word to its digit; unknown words yield "N/A"
/// (which ends the chain, matching the widget having claimed the rating).
fn star_word_to_digit(word: &str) -> String {
    match word.to_lowercase().as_str() {
        "one" => "1",
        "two" => "2",
        "three" => "3",
        "four" => "4",
        "five" => "5",
        _ => NOT_AVAILABLE,
    }
    .to_string()
}

/// Count descendants carrying an active/filled star marker class.
fn count_marked_stars(element: &Selection) -> usize {
    element
        .select("*")
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .filter(|sel| dom::class_tokens(sel).iter().any(|c| STAR_MARK.is_match(c)))
        .count()
}

// =============================================================================
// Quote
// =============================================================================

/// Trimmed text of the first element matching the quote-text chain.
#[must_use]
pub fn extract_quote_text(container: &Selection, chain: &SelectorChain) -> Option<String> {
    crate::selectors::resolve_first(container, chain).map(|el| dom::text_trimmed(&el))
}

/// Trimmed text of the first element matching the quote-author chain.
/// `Some` whenever an author element matched, even with blank text.
#[must_use]
pub fn extract_quote_author(container: &Selection, chain: &SelectorChain) -> Option<String> {
    crate::selectors::resolve_first(container, chain).map(|el| dom::text_trimmed(&el))
}
