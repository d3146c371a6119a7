//! Extracted records and output header computation.
//!
//! A container is classified exactly once as product- or quote-shaped; the
//! degenerate whole-page fallback gets its own shape. Each shape carries only
//! its own fields, which keeps field-presence checks out of the extraction
//! code.

/// Sentinel value meaning "field not found".
pub const NOT_AVAILABLE: &str = "N/A";

/// Output field names.
pub mod field {
    pub const NAME: &str = "Name";
    pub const PRICE: &str = "Price";
    pub const RATING: &str = "Rating";
    pub const QUOTE: &str = "Quote";
    pub const AUTHOR: &str = "Author";
    pub const CONTENT: &str = "Content";
}

/// Fields emitted first, in this order, when present in any record.
const PREFERRED_HEADERS: &[&str] = &[field::NAME, field::PRICE, field::RATING];

/// One extracted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// Commerce listing. Unresolved fields hold the "N/A" sentinel.
    Product {
        name: String,
        price: String,
        rating: String,
    },
    /// Quotation block. Only constructed with non-empty quote text; the
    /// author is present when an author element matched, even if blank.
    Quote {
        text: String,
        author: Option<String>,
    },
    /// Whole-page fallback when no containers matched at all.
    Content { text: String },
}

impl Record {
    /// Field name/value pairs of this record.
    #[must_use]
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        match self {
            Record::Product { name, price, rating } => vec![
                (field::NAME, name.as_str()),
                (field::PRICE, price.as_str()),
                (field::RATING, rating.as_str()),
            ],
            Record::Quote { text, author } => {
                let mut fields = vec![(field::QUOTE, text.as_str())];
                if let Some(author) = author {
                    fields.push((field::AUTHOR, author.as_str()));
                }
                fields
            }
            Record::Content { text } => vec![(field::CONTENT, text.as_str())],
        }
    }

    /// Value of a named field, if this record carries it.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields()
            .into_iter()
            .find_map(|(field, value)| (field == name).then_some(value))
    }

    /// Keep rule: at least one recognized value field differs from the
    /// "N/A" sentinel. Records failing this are discarded silently.
    #[must_use]
    pub fn has_data(&self) -> bool {
        match self {
            Record::Product { name, price, rating } => {
                name != NOT_AVAILABLE || price != NOT_AVAILABLE || rating != NOT_AVAILABLE
            }
            // Quote text is non-empty by construction; fallback content is
            // only emitted for a non-empty body.
            Record::Quote { .. } | Record::Content { .. } => true,
        }
    }
}

/// Compute the output column set: the union of keys across all records,
/// preferred fields first in fixed order, remainder sorted.
///
/// Deterministic for identical key-sets regardless of record order, so
/// downstream tabular output has stable columns.
#[must_use]
pub fn build_headers(records: &[Record]) -> Vec<String> {
    let mut keys: Vec<&str> = Vec::new();
    for record in records {
        for (name, _) in record.fields() {
            if !keys.contains(&name) {
                keys.push(name);
            }
        }
    }

    let mut headers: Vec<String> = Vec::new();
    for preferred in PREFERRED_HEADERS {
        if let Some(pos) = keys.iter().position(|k| k == preferred) {
            keys.remove(pos);
            headers.push((*preferred).to_string());
        }
    }
    keys.sort_unstable();
    headers.extend(keys.iter().map(|k| (*k).to_string()));
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, price: &str, rating: &str) -> Record {
        Record::Product {
            name: name.to_string(),
            price: price.to_string(),
            rating: rating.to_string(),
        }
    }

    #[test]
    fn header_union_prefers_fixed_order_then_sorts() {
        let records = vec![
            product("A", "1", NOT_AVAILABLE),
            Record::Quote {
                text: "Q".to_string(),
                author: Some("B".to_string()),
            },
        ];
        assert_eq!(
            build_headers(&records),
            vec!["Name", "Price", "Rating", "Author", "Quote"]
        );
    }

    #[test]
    fn header_union_is_order_independent() {
        let a = vec![product("A", "1", "5"), Record::Content { text: "x".into() }];
        let b = vec![Record::Content { text: "x".into() }, product("A", "1", "5")];
        assert_eq!(build_headers(&a), build_headers(&b));
    }

    #[test]
    fn header_union_omits_absent_preferred_fields() {
        let records = vec![Record::Quote {
            text: "Q".to_string(),
            author: None,
        }];
        assert_eq!(build_headers(&records), vec!["Quote"]);
    }

    #[test]
    fn all_sentinel_product_has_no_data() {
        assert!(!product(NOT_AVAILABLE, NOT_AVAILABLE, NOT_AVAILABLE).has_data());
        assert!(product(NOT_AVAILABLE, "3.99", NOT_AVAILABLE).has_data());
    }

    #[test]
    fn get_returns_field_values() {
        let record = product("Widget", "9.99", "4");
        assert_eq!(record.get("Price"), Some("9.99"));
        assert_eq!(record.get("Quote"), None);
    }
}
