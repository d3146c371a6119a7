//! Core extraction pipeline.
//!
//! One run over one parsed page: profile lookup, container discovery with
//! node-identity deduplication, per-container classification (quote vs
//! product) and field extraction, with a whole-page text fallback when no
//! containers match at all.

use crate::dom::{self, Document, Selection};
use crate::fields;
use crate::options::ScrapeOptions;
use crate::profiles::{self, FieldChains};
use crate::record::Record;
use crate::runlog::RunLog;
use crate::selectors::{self, SelectorChain};

/// Longest whole-page fallback text, in characters, before truncation.
const FALLBACK_TEXT_CAP: usize = 500;

/// Extract all records from one parsed page.
///
/// The document and every selection into it live only for the duration of
/// this call; the returned records own their strings.
pub(crate) fn run_extraction(
    html: &str,
    url: &str,
    options: &ScrapeOptions,
    log: &mut RunLog,
) -> Vec<Record> {
    let document = dom::parse(html);
    let root = document.select("html");
    let chains = profiles::chains_for(url, log);

    let mut containers = discover_containers(&root, &chains, options, log);
    if containers.is_empty() {
        log.note("No item containers found. Extracting general page content.");
        return fallback_page_record(&document, log);
    }

    log.note(format!("Processing {} detected items.", containers.len()));

    let mut records = Vec::new();
    for container in containers.drain(..) {
        match classify_and_extract(&container, &chains) {
            Some(record) => {
                log.note(format!("Extracted: {}", summarize(&record)));
                records.push(record);
            }
            None => {
                tracing::debug!("container yielded no populated fields, discarded");
            }
        }
    }
    records
}

/// Container discovery: product chain (profile selectors merged ahead)
/// first, then the quote chain, deduplicating by node identity after each
/// successful resolution.
fn discover_containers<'a>(
    root: &Selection<'a>,
    chains: &FieldChains,
    options: &ScrapeOptions,
    log: &mut RunLog,
) -> Vec<Selection<'a>> {
    let product = resolve_containers(root, &chains.container, options, "product", log);
    if !product.is_empty() {
        return product;
    }

    log.note("No common product containers found. Attempting to find quote containers.");
    resolve_containers(root, &chains.quote_container, options, "quote", log)
}

fn resolve_containers<'a>(
    root: &Selection<'a>,
    chain: &SelectorChain,
    options: &ScrapeOptions,
    kind: &str,
    log: &mut RunLog,
) -> Vec<Selection<'a>> {
    let resolved = selectors::resolve_all(root, chain, options.container_limit);
    for selector in &resolved.invalid {
        log.note(format!("Skipping unsupported selector: '{selector}'"));
    }
    if let Some(winner) = &resolved.winner {
        log.note(format!("Found {kind} containers using selector: '{winner}'"));
    }
    selectors::dedup_by_node(resolved.matches)
}

/// Classify one container and extract its fields.
///
/// Classification is exclusive: a quote container that yields non-empty
/// quote text never takes the product path. Product extraction is the
/// default path otherwise, and `None` means the record had no populated
/// fields and is dropped.
fn classify_and_extract(container: &Selection, chains: &FieldChains) -> Option<Record> {
    let quote_shaped = chains.quote_site || dom::has_class_token(container, "quote");

    if quote_shaped {
        if let Some(text) = fields::extract_quote_text(container, &chains.quote_text) {
            if !text.is_empty() {
                let author = fields::extract_quote_author(container, &chains.quote_author);
                return Some(Record::Quote { text, author });
            }
        }
        // No usable quote text: fall through to the default product path.
    }

    let record = Record::Product {
        name: fields::extract_name(container, &chains.product_name),
        price: fields::extract_price(container, &chains.price),
        rating: fields::extract_rating(container, &chains.rating),
    };
    record.has_data().then_some(record)
}

/// Last-resort degenerate output: one truncated whole-page-text record,
/// or nothing at all when even the body text is empty.
fn fallback_page_record(document: &Document, log: &mut RunLog) -> Vec<Record> {
    let body_text = dom::text_collapsed(&document.select("body"));
    if body_text.is_empty() {
        log.error("No data found that matches common patterns.");
        return Vec::new();
    }
    vec![Record::Content {
        text: truncate_chars(&body_text, FALLBACK_TEXT_CAP),
    }]
}

/// Truncate to `cap` characters with a trailing ellipsis marker.
fn truncate_chars(text: &str, cap: usize) -> String {
    if text.chars().count() > cap {
        let head: String = text.chars().take(cap).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

/// One-line description of a record for the run log.
fn summarize(record: &Record) -> String {
    let parts: Vec<String> = record
        .fields()
        .iter()
        .map(|(name, value)| format!("{name}={}", truncate_chars(value, 60)))
        .collect();
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_chars_appends_ellipsis_past_cap() {
        let long = "x".repeat(510);
        let capped = truncate_chars(&long, 500);
        assert_eq!(capped.chars().count(), 503);
        assert!(capped.ends_with("..."));

        assert_eq!(truncate_chars("short", 500), "short");
    }

    #[test]
    fn truncate_chars_respects_char_boundaries() {
        let text = "é".repeat(10);
        assert_eq!(truncate_chars(&text, 4), format!("{}...", "é".repeat(4)));
    }
}
