//! Page fetching.
//!
//! One blocking HTTP GET per run with browser-like headers and a hard
//! timeout. A failed fetch aborts the run before any container work; no
//! partial results are ever produced from it.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, CONNECTION, CONTENT_TYPE, USER_AGENT};

use crate::encoding;
use crate::error::{Error, Result};
use crate::options::ScrapeOptions;
use crate::runlog::RunLog;

/// Browser-like user agent; some commerce sites refuse the default one.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/107.0.0.0 Safari/537.36";

/// Fetch one page and return its body as UTF-8 text.
///
/// Compressed transfer (`Accept-Encoding: gzip, deflate, br`) is negotiated
/// and decoded by the client itself.
pub fn fetch_page(url: &str, options: &ScrapeOptions, log: &mut RunLog) -> Result<String> {
    log.note(format!("Fetching content from: {url}"));

    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

    let client = Client::builder()
        .timeout(options.timeout)
        .default_headers(headers)
        .build()?;

    let response = client.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let charset = header_charset(response.headers());
    let body = response.bytes()?;
    Ok(encoding::transcode_to_utf8(&body, charset.as_deref()))
}

/// Charset label from the `Content-Type` response header, if declared.
fn header_charset(headers: &HeaderMap) -> Option<String> {
    let content_type = headers.get(CONTENT_TYPE)?.to_str().ok()?;
    content_type
        .split(';')
        .filter_map(|part| part.trim().strip_prefix("charset="))
        .map(|label| label.trim_matches('"').to_string())
        .next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderMap;

    fn headers_with(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_str(content_type).expect("header value"),
        );
        headers
    }

    #[test]
    fn charset_parsed_from_content_type() {
        let headers = headers_with("text/html; charset=ISO-8859-1");
        assert_eq!(header_charset(&headers).as_deref(), Some("ISO-8859-1"));
    }

    #[test]
    fn quoted_charset_unwrapped() {
        let headers = headers_with(r#"text/html; charset="utf-8""#);
        assert_eq!(header_charset(&headers).as_deref(), Some("utf-8"));
    }

    #[test]
    fn missing_charset_is_none() {
        assert_eq!(header_charset(&headers_with("text/html")), None);
        assert_eq!(header_charset(&HeaderMap::new()), None);
    }
}
