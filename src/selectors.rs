//! Selector chains and cascading resolution.
//!
//! A [`SelectorChain`] is an ordered fallback list of CSS selectors. Probing
//! stops at the first selector that yields any match; later selectors in the
//! chain are never evaluated. Malformed selectors are skipped, never fatal.

use std::collections::HashSet;

use crate::dom::{self, Matcher, NodeId, Selection};

/// Per-probe match cap when resolving container chains.
pub const DEFAULT_PROBE_LIMIT: usize = 100;

// =============================================================================
// Generic default chains
// =============================================================================

/// Container selectors for product-shaped pages, most specific first.
pub(crate) const PRODUCT_CONTAINER_SELECTORS: &[&str] = &[
    "article.product_pod",
    "div.product-grid-item",
    "li.product-item",
    "div.product-card",
    "article.product",
    r#"div[data-component-type="s-search-result"]"#,
    ".s-result-item",
    ".product-layout .product-thumb",
    ".item-row",
    ".result-item",
    r#"[class*="product"]"#,
    r#"[id*="product"]"#,
    r#"[data-test*="product"]"#,
    ".col-md-4.col-sm-6.col-xl-3",
];

pub(crate) const PRODUCT_NAME_SELECTORS: &[&str] = &[
    "h3 a",
    "h2.product-title a",
    "a.product-name",
    "span.a-size-medium.a-color-base.a-text-normal",
    "a.s-link-style span.a-text-normal",
    ".caption h4 a",
    r#"h1[itemprop="name"]"#,
    "h2",
    "h3",
    "h4",
    "a[title]",
    ".title",
    ".name",
    ".product-name",
    ".item-name",
];

pub(crate) const PRODUCT_PRICE_SELECTORS: &[&str] = &[
    "p.price_color",
    "span.product-price",
    "span.a-price-whole",
    "span.a-offscreen",
    ".price .price-new",
    ".price",
    ".amount",
    ".current-price",
    ".display-price",
    ".sale-price",
    "strong.price",
    r#"span[data-a-color="price"]"#,
];

pub(crate) const PRODUCT_RATING_SELECTORS: &[&str] = &[
    "p.star-rating",
    "div.star-rating span.rating-value",
    "span.a-icon-alt",
    "div.rating span.fa-star.active",
    ".rating",
    ".stars",
    r#"[class*="rating"]"#,
    r#"i[class*="star"]"#,
];

pub(crate) const QUOTE_CONTAINER_SELECTORS: &[&str] = &["div.quote"];

pub(crate) const QUOTE_TEXT_SELECTORS: &[&str] = &["span.text", "div.quote-content"];

pub(crate) const QUOTE_AUTHOR_SELECTORS: &[&str] = &["small.author", ".quote-author"];

/// Auxiliary selector for split whole/fraction price displays.
pub(crate) const PRICE_FRACTION_SELECTOR: &str = "span.a-price-fraction";

// =============================================================================
// SelectorChain
// =============================================================================

/// Ordered fallback list of CSS selector strings; first match wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorChain {
    selectors: Vec<String>,
}

impl SelectorChain {
    /// Build a chain from site-specific selectors followed by generic
    /// defaults. Site entries take priority by position.
    #[must_use]
    pub fn merged(site: &[&str], generic: &[&str]) -> Self {
        let selectors = site
            .iter()
            .chain(generic.iter())
            .map(|s| (*s).to_string())
            .collect();
        Self { selectors }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.selectors.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for SelectorChain {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            selectors: iter.into_iter().map(Into::into).collect(),
        }
    }
}

// =============================================================================
// Probing
// =============================================================================

/// Outcome of probing one selector string against one scope.
#[derive(Debug)]
pub enum ProbeOutcome<'a> {
    /// At least one element matched (capped at the probe limit).
    Matched(Vec<Selection<'a>>),
    /// The selector parsed but nothing matched.
    NoMatch,
    /// The selector string is malformed or unsupported by the query engine.
    Invalid,
}

/// Probe a single selector against `scope`, capping matches at `limit`.
#[must_use]
pub fn probe<'a>(scope: &Selection<'a>, selector: &str, limit: usize) -> ProbeOutcome<'a> {
    let Ok(matcher) = Matcher::new(selector) else {
        return ProbeOutcome::Invalid;
    };
    let found = scope.select_matcher(&matcher);
    if found.is_empty() {
        return ProbeOutcome::NoMatch;
    }
    let matches = found
        .nodes()
        .iter()
        .take(limit)
        .map(|node| Selection::from(*node))
        .collect();
    ProbeOutcome::Matched(matches)
}

/// Result of resolving a whole chain: the winning matches plus the probe
/// bookkeeping the caller is expected to log.
#[derive(Debug, Default)]
pub struct Resolved<'a> {
    /// Matches from the first selector that yielded any, in document order.
    pub matches: Vec<Selection<'a>>,
    /// The selector that won, if any.
    pub winner: Option<String>,
    /// Malformed selectors encountered before the winner.
    pub invalid: Vec<String>,
}

/// Resolve a chain against `scope`: probe each selector in order and return
/// the matches of the first non-empty probe.
#[must_use]
pub fn resolve_all<'a>(
    scope: &Selection<'a>,
    chain: &SelectorChain,
    limit: usize,
) -> Resolved<'a> {
    let mut resolved = Resolved::default();
    for selector in chain.iter() {
        match probe(scope, selector, limit) {
            ProbeOutcome::Matched(matches) => {
                resolved.matches = matches;
                resolved.winner = Some(selector.to_string());
                return resolved;
            }
            ProbeOutcome::NoMatch => {}
            ProbeOutcome::Invalid => resolved.invalid.push(selector.to_string()),
        }
    }
    resolved
}

/// Select-first variant used for per-field lookup inside one container.
///
/// Returns the single first match of the first selector that matches at all.
#[must_use]
pub fn resolve_first<'a>(scope: &Selection<'a>, chain: &SelectorChain) -> Option<Selection<'a>> {
    for selector in chain.iter() {
        if let Some(found) = select_first(scope, selector) {
            return Some(found);
        }
    }
    None
}

/// Probe one selector for its first match; malformed selectors count as
/// no match.
#[must_use]
pub fn select_first<'a>(scope: &Selection<'a>, selector: &str) -> Option<Selection<'a>> {
    match probe(scope, selector, 1) {
        ProbeOutcome::Matched(mut matches) => matches.pop(),
        ProbeOutcome::NoMatch | ProbeOutcome::Invalid => None,
    }
}

// =============================================================================
// Deduplication
// =============================================================================

/// Remove duplicate selections referring to the same underlying node,
/// preserving first-seen order.
///
/// A single element can satisfy more than one selector it was probed with,
/// or appear in overlapping match sets.
#[must_use]
pub fn dedup_by_node<'a>(containers: Vec<Selection<'a>>) -> Vec<Selection<'a>> {
    let mut seen: HashSet<NodeId> = HashSet::new();
    containers
        .into_iter()
        .filter(|sel| dom::node_id(sel).is_some_and(|id| seen.insert(id)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;

    #[test]
    fn first_matching_selector_wins() {
        let doc = dom::parse(
            r#"<div>
                <p class="second">B</p>
                <p class="first">A</p>
            </div>"#,
        );
        let root = doc.select("html");
        let chain: SelectorChain = ["p.missing", "p.first", "p.second"].into_iter().collect();

        let resolved = resolve_all(&root, &chain, DEFAULT_PROBE_LIMIT);
        assert_eq!(resolved.winner.as_deref(), Some("p.first"));
        assert_eq!(resolved.matches.len(), 1);
        assert_eq!(dom::text_trimmed(&resolved.matches[0]), "A");
    }

    #[test]
    fn later_selectors_not_evaluated_after_match() {
        // "p.first" wins, so the broader "p" selector must never run:
        // its extra element does not show up in the result.
        let doc = dom::parse(r#"<div><p class="first">A</p><p>extra</p></div>"#);
        let root = doc.select("html");
        let chain: SelectorChain = ["p.first", "p"].into_iter().collect();

        let resolved = resolve_all(&root, &chain, DEFAULT_PROBE_LIMIT);
        assert_eq!(resolved.winner.as_deref(), Some("p.first"));
        assert_eq!(resolved.matches.len(), 1);
    }

    #[test]
    fn malformed_selector_is_skipped_not_fatal() {
        let doc = dom::parse(r#"<div><p class="ok">A</p></div>"#);
        let root = doc.select("html");
        let chain: SelectorChain = ["p..[", "p.ok"].into_iter().collect();

        let resolved = resolve_all(&root, &chain, DEFAULT_PROBE_LIMIT);
        assert_eq!(resolved.invalid, vec!["p..[".to_string()]);
        assert_eq!(resolved.winner.as_deref(), Some("p.ok"));
        assert_eq!(resolved.matches.len(), 1);
    }

    #[test]
    fn empty_chain_and_no_match_yield_empty() {
        let doc = dom::parse("<div><p>A</p></div>");
        let root = doc.select("html");

        let none: SelectorChain = ["span.absent"].into_iter().collect();
        let resolved = resolve_all(&root, &none, DEFAULT_PROBE_LIMIT);
        assert!(resolved.matches.is_empty());
        assert!(resolved.winner.is_none());

        let empty = SelectorChain::default();
        assert!(resolve_all(&root, &empty, DEFAULT_PROBE_LIMIT).matches.is_empty());
    }

    #[test]
    fn probe_respects_limit() {
        let html: String = (0..10).map(|i| format!("<p>{i}</p>")).collect();
        let doc = dom::parse(&format!("<div>{html}</div>"));
        let root = doc.select("html");

        match probe(&root, "p", 3) {
            ProbeOutcome::Matched(matches) => assert_eq!(matches.len(), 3),
            other => panic!("expected Matched, got {other:?}"),
        }
    }

    #[test]
    fn resolve_first_returns_single_element() {
        let doc = dom::parse(r#"<div><span class="text">first</span><span class="text">second</span></div>"#);
        let root = doc.select("html");
        let chain: SelectorChain = ["em.absent", "span.text"].into_iter().collect();

        let found = resolve_first(&root, &chain);
        assert_eq!(found.map(|s| dom::text_trimmed(&s)), Some("first".to_string()));
    }

    #[test]
    fn dedup_preserves_first_seen_order_and_is_idempotent() {
        let doc = dom::parse(r#"<div><p id="a">A</p><p id="b">B</p></div>"#);
        let a = doc.select("#a");
        let b = doc.select("#b");
        let a_again = doc.select("p"); // first node is #a again

        let mixed = vec![
            Selection::from(*a.nodes().first().expect("node")),
            Selection::from(*a_again.nodes().first().expect("node")),
            Selection::from(*b.nodes().first().expect("node")),
        ];

        let once = dedup_by_node(mixed);
        assert_eq!(once.len(), 2);
        assert_eq!(dom::text_trimmed(&once[0]), "A");
        assert_eq!(dom::text_trimmed(&once[1]), "B");

        let ids: Vec<_> = once.iter().map(dom::node_id).collect();
        let twice = dedup_by_node(once);
        let ids_twice: Vec<_> = twice.iter().map(dom::node_id).collect();
        assert_eq!(ids, ids_twice);
    }
}
