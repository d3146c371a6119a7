//! Configuration options for a scrape run.

use std::time::Duration;

/// Configuration for one scrape run.
///
/// All fields are public for easy configuration; use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use listwrangle::ScrapeOptions;
///
/// let options = ScrapeOptions {
///     timeout: Duration::from_secs(5),
///     ..ScrapeOptions::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    /// Hard limit on the network fetch. The fetch fails fast rather than
    /// block indefinitely; nothing is extracted from a failed fetch.
    ///
    /// Default: 20 seconds
    pub timeout: Duration,

    /// Cap on matches per container-selector probe.
    ///
    /// Default: `100`
    pub container_limit: usize,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(20),
            container_limit: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let options = ScrapeOptions::default();
        assert_eq!(options.timeout, Duration::from_secs(20));
        assert_eq!(options.container_limit, 100);
    }
}
