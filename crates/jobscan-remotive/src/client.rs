use crate::types::{Job, JobsResponse};
use reqwest::StatusCode;
use reqwest::blocking;
use std::time::Duration;
use thiserror::Error;

/// Fixed result cap sent with every search.
pub const RESULT_LIMIT: usize = 100;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Why a search produced no listing array. Callers collapse all variants into
/// one generic user-facing notice; the detail is for logs only.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {0}")]
    Status(StatusCode),
    #[error("malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Blocking client for the remote-jobs search endpoint.
pub struct Client {
    http: blocking::Client,
    base_url: String,
}

impl Client {
    pub fn new() -> Result<Self, FetchError> {
        Ok(Self {
            http: blocking::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .user_agent("jobscan")
                .build()?,
            base_url: crate::api_base_url(),
        })
    }

    /// Issue one search with optional keyword and category filters.
    ///
    /// Returns the raw listing array; classifying an empty array as a valid
    /// zero-match outcome is the caller's job.
    pub fn search(&self, keyword: &str, category: &str) -> Result<Vec<Job>, FetchError> {
        let url = search_url(&self.base_url, keyword, category);
        log::debug!("GET {url}");

        let response = self.http.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text()?;
        let parsed: JobsResponse = serde_json::from_str(&body)?;
        log::debug!("{} listings", parsed.jobs.len());
        Ok(parsed.jobs)
    }
}

/// Build the query URL. Empty filters are omitted entirely; the result cap is
/// always present.
fn search_url(base_url: &str, keyword: &str, category: &str) -> String {
    let mut params = Vec::new();
    if !category.is_empty() {
        params.push(format!("category={}", urlencoding::encode(category)));
    }
    if !keyword.is_empty() {
        params.push(format!("search={}", urlencoding::encode(keyword)));
    }
    params.push(format!("limit={RESULT_LIMIT}"));
    format!("{}/api/remote-jobs?{}", base_url, params.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://remotive.com";

    #[test]
    fn url_without_filters() {
        assert_eq!(
            search_url(BASE, "", ""),
            "https://remotive.com/api/remote-jobs?limit=100"
        );
    }

    #[test]
    fn url_with_both_filters() {
        assert_eq!(
            search_url(BASE, "rust", "software-dev"),
            "https://remotive.com/api/remote-jobs?category=software-dev&search=rust&limit=100"
        );
    }

    #[test]
    fn url_encodes_keyword() {
        assert_eq!(
            search_url(BASE, "site reliability & ops", ""),
            "https://remotive.com/api/remote-jobs?search=site%20reliability%20%26%20ops&limit=100"
        );
    }

    #[test]
    fn url_with_category_only() {
        assert_eq!(
            search_url(BASE, "", "design"),
            "https://remotive.com/api/remote-jobs?category=design&limit=100"
        );
    }
}
