use serde::{Deserialize, Serialize};

/// One job posting as returned by the API. Never mutated after fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Unique within one result set.
    pub id: u64,
    /// Apply URL.
    pub url: String,
    pub title: String,
    pub company_name: String,
    /// Logo image URL; not fetched by this crate.
    #[serde(default)]
    pub company_logo: Option<String>,
    #[serde(default)]
    pub category: String,
    /// Enumerated token such as `full_time` or `part_time`.
    #[serde(default)]
    pub job_type: String,
    /// Timestamp string, e.g. `2026-08-27T12:34:56`.
    #[serde(default)]
    pub publication_date: String,
    #[serde(default)]
    pub candidate_required_location: String,
    /// Free-text salary; empty when the listing carries none.
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Long-form description, HTML.
    #[serde(default)]
    pub description: String,
}

impl Job {
    /// Salary text with absence normalized: `None` when the API sent nothing
    /// usable (missing field or blank string).
    pub fn salary_text(&self) -> Option<&str> {
        let s = self.salary.trim();
        (!s.is_empty()).then_some(s)
    }
}

/// Top-level search response. An absent `jobs` array deserializes as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobsResponse {
    #[serde(default)]
    pub jobs: Vec<Job>,
}

/// One search category known to the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    /// Slug sent as the `category` query parameter; empty means no filter.
    pub slug: &'static str,
    pub name: &'static str,
}

/// Categories accepted by the search endpoint. The first entry is the
/// unfiltered default.
pub const CATEGORIES: &[Category] = &[
    Category { slug: "", name: "All categories" },
    Category { slug: "software-dev", name: "Software Development" },
    Category { slug: "customer-support", name: "Customer Service" },
    Category { slug: "design", name: "Design" },
    Category { slug: "marketing", name: "Marketing" },
    Category { slug: "sales-business", name: "Sales / Business" },
    Category { slug: "product", name: "Product" },
    Category { slug: "project-management", name: "Project Management" },
    Category { slug: "data", name: "Data Analysis" },
    Category { slug: "devops", name: "DevOps / Sysadmin" },
    Category { slug: "finance-legal", name: "Finance / Legal" },
    Category { slug: "hr", name: "Human Resources" },
    Category { slug: "qa", name: "QA" },
    Category { slug: "writing", name: "Writing" },
    Category { slug: "all-others", name: "All Others" },
];
