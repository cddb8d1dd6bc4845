use std::collections::HashMap;

use url::Url;

/// Access to the navigation context the host launched the application with.
pub trait ParametersHandler: Send + Sync {
    /// Value of a query-string parameter, if present.
    fn parameter(&self, name: &str) -> Option<String>;

    /// Full URL of the current request.
    fn request_url(&self) -> String;
}

/// Parameters served from a parsed request URL's query string. With repeated
/// keys the last occurrence wins.
#[derive(Debug, Clone)]
pub struct QueryStringParameters {
    url: Url,
    pairs: HashMap<String, String>,
}

impl QueryStringParameters {
    pub fn new(url: Url) -> Self {
        let pairs = url
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        Self { url, pairs }
    }
}

impl ParametersHandler for QueryStringParameters {
    fn parameter(&self, name: &str) -> Option<String> {
        self.pairs.get(name).cloned()
    }

    fn request_url(&self) -> String {
        self.url.to_string()
    }
}
