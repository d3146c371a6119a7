//! DOM operations adapter.
//!
//! Thin layer over the `dom_query` crate with the handful of operations the
//! extraction pipeline needs: parsing, trimmed text, tag/class inspection
//! and a stable node-identity handle for deduplication.

// Re-export core types for external use
pub use dom_query::{Document, Matcher, NodeId, Selection};

// Re-export StrTendril for external use
pub use tendril::StrTendril;

/// Parse HTML string into a document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Get tag name (lowercase) of the first node in the selection.
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_string())
}

/// Get all text content of node and descendants, outer whitespace trimmed.
#[must_use]
pub fn text_trimmed(sel: &Selection) -> String {
    sel.text().trim().to_string()
}

/// Get text content with runs of whitespace collapsed to single spaces.
///
/// HTML text nodes carry the source's indentation; collapsing makes the
/// whole-page fallback text readable as one line.
#[must_use]
pub fn text_collapsed(sel: &Selection) -> String {
    sel.text().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Get the class attribute split into whitespace-separated tokens.
#[must_use]
pub fn class_tokens(sel: &Selection) -> Vec<String> {
    sel.attr("class")
        .map(|c| c.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Check whether the class attribute contains `token` as a whole token.
#[must_use]
pub fn has_class_token(sel: &Selection, token: &str) -> bool {
    sel.attr("class")
        .is_some_and(|c| c.split_whitespace().any(|t| t == token))
}

/// Stable identity of the first node in the selection within its document.
///
/// Two selections referring to the same underlying node yield the same id;
/// ids are only comparable within one document's lifetime.
#[must_use]
pub fn node_id(sel: &Selection) -> Option<NodeId> {
    sel.nodes().first().map(|n| n.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_name_and_text() {
        let doc = parse("<div>  hello <b>world</b>  </div>");
        let div = doc.select("div");

        assert_eq!(tag_name(&div), Some("div".to_string()));
        assert_eq!(text_trimmed(&div), "hello world");
    }

    #[test]
    fn test_text_collapsed_normalizes_whitespace() {
        let doc = parse("<body>\n  <p>one</p>\n  <p>two\n three</p>\n</body>");
        let body = doc.select("body");

        assert_eq!(text_collapsed(&body), "one two three");
    }

    #[test]
    fn test_class_tokens() {
        let doc = parse(r#"<p class="star-rating Three">x</p>"#);
        let p = doc.select("p");

        assert_eq!(class_tokens(&p), vec!["star-rating", "Three"]);
        assert!(has_class_token(&p, "star-rating"));
        assert!(!has_class_token(&p, "star"));
    }

    #[test]
    fn test_class_tokens_missing_attribute() {
        let doc = parse("<p>x</p>");
        let p = doc.select("p");

        assert!(class_tokens(&p).is_empty());
        assert!(!has_class_token(&p, "quote"));
    }

    #[test]
    fn test_node_id_is_stable() {
        let doc = parse(r#"<div class="a b">x</div>"#);
        let by_tag = doc.select("div");
        let by_class = doc.select(".a");

        assert!(node_id(&by_tag).is_some());
        assert_eq!(node_id(&by_tag), node_id(&by_class));
    }
}
