//! Client for the Remotive remote-jobs API.

mod client;
mod types;

pub use client::{Client, FetchError, RESULT_LIMIT};
pub use types::{CATEGORIES, Category, Job, JobsResponse};

fn api_base_url() -> String {
    if let Ok(url) = std::env::var("REMOTIVE_API_URL") {
        return url;
    }
    "https://remotive.com".to_string()
}
