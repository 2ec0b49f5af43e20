use serde::Deserialize;

use crate::config::ApiConfig;
use crate::database::models::PageRequest;

/// Raw `page` / `pageSize` query values. Kept as strings so that bad input
/// falls back to defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    #[serde(rename = "pageSize", alias = "page_size")]
    pub page_size: Option<String>,
}

impl PageQuery {
    pub fn resolve(&self, api: &ApiConfig) -> PageRequest {
        let page = parse_positive(self.page.as_deref()).unwrap_or(1);
        let page_size = parse_positive(self.page_size.as_deref())
            .map(|size| size.min(api.max_page_size))
            .unwrap_or(api.default_page_size);

        PageRequest { page, page_size }
    }
}

/// Parse a strictly positive integer, ignoring surrounding whitespace
pub fn parse_positive(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|s| s.trim().parse::<u32>().ok()).filter(|n| *n > 0)
}

/// Treat blank filter values as absent
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
