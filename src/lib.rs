//! # listwrangle
//!
//! Heuristic extraction of product listings and quote blocks from web pages.
//!
//! Given a page, the library probes cascading chains of CSS selectors (site
//! profile selectors first, then generic fallbacks) to discover repeated
//! container elements, classifies each container as a product or a quote,
//! normalizes the fields it finds, and can persist the results as CSV with a
//! column set computed from the union of extracted fields.
//!
//! ## Quick Start
//!
//! ```rust
//! use listwrangle::extract;
//!
//! let html = r#"<html><body>
//! <article class="product_pod">
//!   <h3><a href="/a">A Light in the Attic</a></h3>
//!   <p class="price_color">£51.77</p>
//! </article>
//! </body></html>"#;
//!
//! let result = extract(html, "https://example.com/catalog");
//! assert_eq!(result.records.len(), 1);
//! assert_eq!(result.records[0].get("Name"), Some("A Light in the Attic"));
//! assert_eq!(result.records[0].get("Price"), Some("51.77"));
//! ```
//!
//! ## Features
//!
//! - **Container Discovery**: Cascading selector chains with first-match-wins
//!   semantics and node-identity deduplication
//! - **Site Profiles**: Per-site selector overrides tried before the generics
//! - **Field Normalization**: Price separator repair, star-rating word and
//!   icon decoding
//! - **Whole-Page Fallback**: Degenerates to a single page-text record when
//!   no container matches
//! - **CSV Output**: Union header computation with stable column order

mod error;
mod extract;
mod fields;
mod options;
mod result;

/// DOM parsing and node inspection helpers over `dom_query`.
pub mod dom;

/// Character encoding detection and transcoding for fetched bytes.
pub mod encoding;

/// Page download with browser-like request headers.
pub mod fetch;

/// Selector chains, probing, and container deduplication.
pub mod selectors;

/// Per-site selector profiles and chain assembly.
pub mod profiles;

/// Extracted record shapes and output header computation.
pub mod record;

/// CSV persistence.
pub mod csv_out;

/// Run narration collected during extraction.
pub mod runlog;

// Public API - re-exports
pub use error::{Error, Result};
pub use options::ScrapeOptions;
pub use record::{build_headers, Record, NOT_AVAILABLE};
pub use result::ScrapeResult;
pub use runlog::{LogLine, RunLog};

use std::path::Path;

/// Validates that a string is a usable absolute `http`/`https` URL.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] when the URL is empty, lacks an
/// `http://`/`https://` scheme prefix, or fails to parse.
pub fn validate_url(url: &str) -> Result<()> {
    let url = url.trim();
    if url.is_empty() {
        return Err(Error::InvalidInput("URL is empty.".to_string()));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(Error::InvalidInput(
            "URL must start with http:// or https://".to_string(),
        ));
    }
    url::Url::parse(url)
        .map_err(|e| Error::InvalidInput(format!("Invalid URL format: {e}")))?;
    Ok(())
}

/// Validates that an output path carries a usable file name.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] when the path is empty, so a bare run
/// never silently writes a hidden `.csv` file.
pub fn validate_output_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(Error::InvalidInput("Filename is empty.".to_string()));
    }
    Ok(())
}

/// Extracts records from an HTML document using default options.
///
/// The `url` is only consulted for site-profile lookup; it does not need to
/// be reachable and is never fetched.
///
/// # Example
///
/// ```rust
/// use listwrangle::extract;
///
/// let html = r#"<div class="quote"><span class="text">Words.</span>
/// <small class="author">Someone</small></div>"#;
/// let result = extract(html, "https://quotes.toscrape.com/");
/// assert_eq!(result.records[0].get("Quote"), Some("Words."));
/// ```
#[must_use]
pub fn extract(html: &str, url: &str) -> ScrapeResult {
    extract_with_options(html, url, &ScrapeOptions::default())
}

/// Extracts records from an HTML document with custom options.
#[must_use]
pub fn extract_with_options(html: &str, url: &str, options: &ScrapeOptions) -> ScrapeResult {
    let mut log = RunLog::new();
    let records = extract::run_extraction(html, url, options, &mut log);
    ScrapeResult::new(records, log)
}

/// Fetches a page and extracts records from it using default options.
///
/// # Errors
///
/// Returns an error when the URL is invalid, the request fails or times out,
/// or the server responds with a non-success status.
pub fn scrape(url: &str) -> Result<ScrapeResult> {
    scrape_with_options(url, &ScrapeOptions::default())
}

/// Fetches a page and extracts records from it with custom options.
///
/// # Errors
///
/// Returns an error when the URL is invalid, the request fails or times out,
/// or the server responds with a non-success status.
pub fn scrape_with_options(url: &str, options: &ScrapeOptions) -> Result<ScrapeResult> {
    let mut log = RunLog::new();
    scrape_with_run_log(url, options, &mut log).map(|records| ScrapeResult::new(records, log))
}

/// Fetches a page and extracts records, narrating into a caller-supplied
/// run log.
///
/// Unlike [`scrape_with_options`], the narration survives a failed fetch:
/// the network error is appended as an error-tagged line and the log stays
/// with the caller, so a host UI can replay it for error runs too.
///
/// # Errors
///
/// Returns an error when the URL is invalid, the request fails or times out,
/// or the server responds with a non-success status.
pub fn scrape_with_run_log(
    url: &str,
    options: &ScrapeOptions,
    log: &mut RunLog,
) -> Result<Vec<Record>> {
    validate_url(url)?;
    let html = match fetch::fetch_page(url, options, log) {
        Ok(html) => html,
        Err(err) => {
            log.error(format!("Network issue - {err}"));
            return Err(err);
        }
    };
    Ok(extract::run_extraction(&html, url, options, log))
}

/// Fetches a page, extracts records, and writes them to a CSV file.
///
/// A `.csv` extension is appended to `path` when missing. When zero records
/// are extracted no file is written and the result's status says so.
///
/// # Errors
///
/// Returns an error when the URL or output path is invalid, the request
/// fails, or the CSV file cannot be written.
pub fn scrape_to_csv(url: &str, path: &Path) -> Result<ScrapeResult> {
    scrape_to_csv_with_options(url, path, &ScrapeOptions::default())
}

/// Fetches a page, extracts records, and writes them to a CSV file with
/// custom options.
///
/// # Errors
///
/// Returns an error when the URL or output path is invalid, the request
/// fails, or the CSV file cannot be written.
pub fn scrape_to_csv_with_options(
    url: &str,
    path: &Path,
    options: &ScrapeOptions,
) -> Result<ScrapeResult> {
    validate_output_path(path)?;
    let mut result = scrape_with_options(url, options)?;
    if result.has_records() {
        let path = csv_out::ensure_csv_extension(path.to_path_buf());
        csv_out::write_records(&path, &result.headers, &result.records)?;
        result.status = format!(
            "Successfully extracted {} entries and saved to {}",
            result.records.len(),
            path.display()
        );
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_url_accepts_http_and_https() {
        assert!(validate_url("http://example.com").is_ok());
        assert!(validate_url("https://example.com/path?q=1").is_ok());
    }

    #[test]
    fn validate_url_rejects_empty_and_schemeless() {
        assert!(matches!(validate_url(""), Err(Error::InvalidInput(_))));
        assert!(matches!(validate_url("   "), Err(Error::InvalidInput(_))));
        assert!(matches!(
            validate_url("example.com"),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            validate_url("ftp://example.com"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn validate_url_rejects_unparsable() {
        assert!(matches!(
            validate_url("http://"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn empty_output_path_is_rejected_before_any_fetch() {
        // Path validation runs first, so no request is ever issued and no
        // hidden ".csv" file appears in the working directory.
        let err = scrape_to_csv("https://example.com/", Path::new(""));
        assert!(matches!(err, Err(Error::InvalidInput(_))));
        assert!(validate_output_path(Path::new("out")).is_ok());
    }

    #[test]
    fn failed_fetch_narrates_into_caller_log() {
        let mut log = RunLog::new();
        let options = ScrapeOptions {
            timeout: std::time::Duration::from_secs(1),
            ..ScrapeOptions::default()
        };
        // Port 0 is never connectable, so the fetch fails without touching
        // the network.
        let outcome = scrape_with_run_log("http://127.0.0.1:0/", &options, &mut log);

        assert!(outcome.is_err());
        assert!(log
            .lines()
            .iter()
            .any(|l| l.message.starts_with("Fetching content from:")));
        assert!(log
            .lines()
            .iter()
            .any(|l| l.is_error && l.message.contains("Network issue")));
    }
}
