//! Site profiles: static per-host overrides of the default selector chains.
//!
//! A profile is matched by literal URL prefix against a small closed
//! registry, evaluated in registration order with first match winning. At
//! most one profile applies per run. Profile selectors are merged ahead of
//! the generic defaults for each field role.

use crate::runlog::RunLog;
use crate::selectors::{
    SelectorChain, PRODUCT_CONTAINER_SELECTORS, PRODUCT_NAME_SELECTORS, PRODUCT_PRICE_SELECTORS,
    PRODUCT_RATING_SELECTORS, QUOTE_AUTHOR_SELECTORS, QUOTE_CONTAINER_SELECTORS,
    QUOTE_TEXT_SELECTORS,
};

/// Preferred selectors for one known site.
#[derive(Debug)]
pub struct SiteProfile {
    pub name: &'static str,
    /// Literal prefix matched against the raw input URL, not normalized.
    pub url_prefix: &'static str,
    /// True when the profile describes a quote-shaped site; such pages take
    /// the quote classification path for every container.
    pub quote_site: bool,
    pub container: &'static [&'static str],
    pub product_name: &'static [&'static str],
    pub price: &'static [&'static str],
    pub rating: &'static [&'static str],
    pub quote_text: &'static [&'static str],
    pub quote_author: &'static [&'static str],
}

/// The closed profile registry. Extend by adding entries; extraction logic
/// never needs to change.
static REGISTRY: &[SiteProfile] = &[
    SiteProfile {
        name: "books.toscrape.com",
        url_prefix: "http://books.toscrape.com",
        quote_site: false,
        container: &["article.product_pod"],
        product_name: &["h3 a"],
        price: &["p.price_color"],
        rating: &["p.star-rating"],
        quote_text: &[],
        quote_author: &[],
    },
    SiteProfile {
        name: "quotes.toscrape.com",
        url_prefix: "http://quotes.toscrape.com",
        quote_site: true,
        container: &["div.quote"],
        product_name: &[],
        price: &[],
        rating: &[],
        quote_text: &["span.text"],
        quote_author: &["small.author"],
    },
];

/// Look up the profile whose URL prefix matches `url`, if any.
#[must_use]
pub fn lookup(url: &str) -> Option<&'static SiteProfile> {
    REGISTRY.iter().find(|p| url.starts_with(p.url_prefix))
}

/// The effective selector chains for one extraction run, with any matching
/// profile's selectors merged ahead of the generic defaults.
#[derive(Debug)]
pub struct FieldChains {
    /// Whether the run matched a quote-shaped site profile.
    pub quote_site: bool,
    pub container: SelectorChain,
    pub product_name: SelectorChain,
    pub price: SelectorChain,
    pub rating: SelectorChain,
    pub quote_container: SelectorChain,
    pub quote_text: SelectorChain,
    pub quote_author: SelectorChain,
}

/// Build the effective chains for `url`. Looked up once per run, before
/// container discovery.
#[must_use]
pub fn chains_for(url: &str, log: &mut RunLog) -> FieldChains {
    let profile = lookup(url);
    if let Some(profile) = profile {
        log.note(format!("Applying site-specific selectors for {}", profile.name));
    }

    let site = |field: fn(&SiteProfile) -> &'static [&'static str]| -> &[&str] {
        profile.map(field).unwrap_or(&[])
    };

    let quote_site = profile.is_some_and(|p| p.quote_site);
    // Only a quote-shaped profile contributes to the quote container chain;
    // product profiles contribute to the product container chain instead.
    let quote_container_site: &[&str] = if quote_site { site(|p| p.container) } else { &[] };

    FieldChains {
        quote_site,
        container: SelectorChain::merged(site(|p| p.container), PRODUCT_CONTAINER_SELECTORS),
        product_name: SelectorChain::merged(site(|p| p.product_name), PRODUCT_NAME_SELECTORS),
        price: SelectorChain::merged(site(|p| p.price), PRODUCT_PRICE_SELECTORS),
        rating: SelectorChain::merged(site(|p| p.rating), PRODUCT_RATING_SELECTORS),
        quote_container: SelectorChain::merged(quote_container_site, QUOTE_CONTAINER_SELECTORS),
        quote_text: SelectorChain::merged(site(|p| p.quote_text), QUOTE_TEXT_SELECTORS),
        quote_author: SelectorChain::merged(site(|p| p.quote_author), QUOTE_AUTHOR_SELECTORS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_matches_by_literal_prefix() {
        let books = lookup("http://books.toscrape.com/catalogue/page-2.html");
        assert_eq!(books.map(|p| p.name), Some("books.toscrape.com"));

        let quotes = lookup("http://quotes.toscrape.com/page/3/");
        assert!(quotes.is_some_and(|p| p.quote_site));
    }

    #[test]
    fn lookup_is_not_scheme_normalized() {
        // The registry keys https variants separately; the literal prefix
        // test intentionally does not match them.
        assert!(lookup("https://books.toscrape.com/").is_none());
        assert!(lookup("http://example.com/shop").is_none());
    }

    #[test]
    fn profile_selectors_merge_ahead_of_generic() {
        let mut log = RunLog::new();
        let chains = chains_for("http://books.toscrape.com/", &mut log);

        assert!(!chains.quote_site);
        let first: Vec<&str> = chains.container.iter().take(2).collect();
        assert_eq!(first, vec!["article.product_pod", "article.product_pod"]);
        assert_eq!(chains.price.iter().next(), Some("p.price_color"));
        // Quote chain stays generic for a product-shaped profile.
        assert_eq!(chains.quote_container.iter().collect::<Vec<_>>(), vec!["div.quote"]);
        assert!(!log.is_empty());
    }

    #[test]
    fn unknown_url_gets_generic_chains_only() {
        let mut log = RunLog::new();
        let chains = chains_for("https://shop.example.com/", &mut log);

        assert!(!chains.quote_site);
        assert_eq!(chains.container.iter().next(), Some("article.product_pod"));
        assert_eq!(chains.quote_text.iter().next(), Some("span.text"));
        assert!(log.is_empty());
    }
}
