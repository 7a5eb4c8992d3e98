//! Pure view models mapping API listings to displayable form.
//!
//! The TUI and the one-shot CLI both render from these structs; untrusted API
//! strings stay plain data here and are only ever styled, never interpolated
//! into any kind of markup.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use jobscan_remotive::Job;

/// Placeholder shown wherever a listing carries no salary text. Absence is
/// shown explicitly, never hidden.
pub const UNKNOWN_SALARY: &str = "Unknown salary";

/// Tags shown on a card before collapsing into a `+N` overflow marker.
const CARD_TAG_LIMIT: usize = 3;

/// One result card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCard {
    pub id: u64,
    /// Single-letter stand-in for the company logo.
    pub glyph: char,
    pub title: String,
    pub company: String,
    /// `category · job type · location`
    pub summary: String,
    /// `Posted Aug 27, 2026`
    pub posted: String,
    pub tags: Vec<String>,
    /// How many tags were dropped beyond [`CARD_TAG_LIMIT`].
    pub tag_overflow: usize,
    pub salary: String,
    pub apply_url: String,
}

impl JobCard {
    pub fn from_job(job: &Job) -> Self {
        let tags: Vec<String> = job.tags.iter().take(CARD_TAG_LIMIT).cloned().collect();
        Self {
            id: job.id,
            glyph: company_glyph(&job.company_name),
            title: job.title.clone(),
            company: job.company_name.clone(),
            summary: summary_line(job),
            posted: posted_line(&job.publication_date),
            tag_overflow: job.tags.len().saturating_sub(tags.len()),
            tags,
            salary: salary_line(job),
            apply_url: job.url.clone(),
        }
    }
}

/// The detail overlay for one listing: same header data as the card, but the
/// full tag list and the long-form description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDetail {
    pub glyph: char,
    pub title: String,
    pub company: String,
    pub summary: String,
    pub posted: String,
    pub tags: Vec<String>,
    pub salary: String,
    pub apply_url: String,
}

impl JobDetail {
    pub fn from_job(job: &Job) -> Self {
        Self {
            glyph: company_glyph(&job.company_name),
            title: job.title.clone(),
            company: job.company_name.clone(),
            summary: summary_line(job),
            posted: posted_line(&job.publication_date),
            tags: job.tags.clone(),
            salary: salary_line(job),
            apply_url: job.url.clone(),
        }
    }
}

/// Long-form description as plain text lines wrapped to `width` columns.
pub fn description_lines(job: &Job, width: usize) -> Vec<String> {
    let text = html2text::from_read(job.description.as_bytes(), width.max(20)).unwrap_or_default();
    text.lines().map(str::to_string).collect()
}

/// First letter of the company name, uppercased. The terminal renderer always
/// uses this in place of the logo image.
pub fn company_glyph(company: &str) -> char {
    company
        .trim()
        .chars()
        .next()
        .and_then(|c| c.to_uppercase().next())
        .unwrap_or('?')
}

/// `full_time` -> `Full Time`
pub fn format_job_type(job_type: &str) -> String {
    job_type
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Month-abbreviated date (`Aug 27, 2026`). Falls back to the raw string when
/// the timestamp does not parse.
pub fn format_date(timestamp: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return dt.format("%b %-d, %Y").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S") {
        return dt.format("%b %-d, %Y").to_string();
    }
    if let Ok(d) = NaiveDate::parse_from_str(timestamp, "%Y-%m-%d") {
        return d.format("%b %-d, %Y").to_string();
    }
    timestamp.to_string()
}

fn summary_line(job: &Job) -> String {
    let job_type = format_job_type(&job.job_type);
    let mut parts: Vec<&str> = Vec::new();
    if !job.category.is_empty() {
        parts.push(&job.category);
    }
    if !job_type.is_empty() {
        parts.push(&job_type);
    }
    if !job.candidate_required_location.is_empty() {
        parts.push(&job.candidate_required_location);
    }
    parts.join(" · ")
}

fn posted_line(timestamp: &str) -> String {
    format!("Posted {}", format_date(timestamp))
}

fn salary_line(job: &Job) -> String {
    match job.salary_text() {
        Some(s) => s.to_string(),
        None => UNKNOWN_SALARY.to_string(),
    }
}

/// Greedy word wrap.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if current_line.is_empty() {
            current_line = word.to_string();
        } else if current_line.len() + 1 + word.len() <= max_width {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            lines.push(current_line);
            current_line = word.to_string();
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> Job {
        Job {
            id: 42,
            url: "https://remotive.com/remote-jobs/software-dev/rust-engineer-42".to_string(),
            title: "Rust Engineer".to_string(),
            company_name: "acme systems".to_string(),
            company_logo: Some("https://remotive.com/logo.png".to_string()),
            category: "Software Development".to_string(),
            job_type: "full_time".to_string(),
            publication_date: "2026-08-20T09:15:00".to_string(),
            candidate_required_location: "Worldwide".to_string(),
            salary: String::new(),
            tags: vec![
                "rust".to_string(),
                "backend".to_string(),
                "api".to_string(),
                "tokio".to_string(),
                "grpc".to_string(),
            ],
            description: "<p>Build <b>reliable</b> services.</p>".to_string(),
        }
    }

    #[test]
    fn job_type_title_cased() {
        assert_eq!(format_job_type("full_time"), "Full Time");
        assert_eq!(format_job_type("part_time"), "Part Time");
        assert_eq!(format_job_type("contract"), "Contract");
        assert_eq!(format_job_type(""), "");
    }

    #[test]
    fn date_month_abbreviated() {
        assert_eq!(format_date("2026-08-20T09:15:00"), "Aug 20, 2026");
        assert_eq!(format_date("2025-01-03"), "Jan 3, 2025");
    }

    #[test]
    fn unparseable_date_passes_through() {
        assert_eq!(format_date("last week"), "last week");
    }

    #[test]
    fn card_caps_tags_with_overflow() {
        let card = JobCard::from_job(&job());
        assert_eq!(card.tags, vec!["rust", "backend", "api"]);
        assert_eq!(card.tag_overflow, 2);
    }

    #[test]
    fn card_without_overflow() {
        let mut j = job();
        j.tags.truncate(2);
        let card = JobCard::from_job(&j);
        assert_eq!(card.tags.len(), 2);
        assert_eq!(card.tag_overflow, 0);
    }

    #[test]
    fn detail_keeps_all_tags() {
        let detail = JobDetail::from_job(&job());
        assert_eq!(detail.tags.len(), 5);
    }

    #[test]
    fn salary_placeholder_in_both_views() {
        let j = job();
        assert_eq!(JobCard::from_job(&j).salary, UNKNOWN_SALARY);
        assert_eq!(JobDetail::from_job(&j).salary, UNKNOWN_SALARY);

        let mut paid = job();
        paid.salary = "$120k - $150k".to_string();
        assert_eq!(JobCard::from_job(&paid).salary, "$120k - $150k");
        assert_eq!(JobDetail::from_job(&paid).salary, "$120k - $150k");
    }

    #[test]
    fn glyph_is_uppercased_first_letter() {
        assert_eq!(company_glyph("acme systems"), 'A');
        assert_eq!(company_glyph("  stripe"), 'S');
        assert_eq!(company_glyph(""), '?');
    }

    #[test]
    fn summary_joins_present_fields() {
        let card = JobCard::from_job(&job());
        assert_eq!(card.summary, "Software Development · Full Time · Worldwide");

        let mut j = job();
        j.job_type.clear();
        let card = JobCard::from_job(&j);
        assert_eq!(card.summary, "Software Development · Worldwide");
    }

    #[test]
    fn description_is_stripped_of_markup() {
        let lines = description_lines(&job(), 60);
        let text = lines.join(" ");
        assert!(text.contains("Build"));
        assert!(text.contains("reliable"));
        assert!(!text.contains('<'));
    }

    #[test]
    fn wrap_respects_width() {
        let lines = wrap_text("one two three four five", 9);
        assert_eq!(lines, vec!["one two", "three", "four five"]);
        for line in &lines {
            assert!(line.len() <= 9);
        }
    }
}
