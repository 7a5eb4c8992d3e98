use anyhow::Result;
use clap::Args;
use colored::Colorize;
use jobscan_remotive::{CATEGORIES, Client};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::pager;
use crate::view::JobCard;

#[derive(Args)]
pub struct SearchArgs {
    /// Keyword to search for
    pub keyword: Option<String>,

    /// Category slug to filter by (see --list-categories)
    #[arg(short, long, default_value = "")]
    pub category: String,

    /// 1-based page of results to print
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Print the page as JSON instead of formatted cards
    #[arg(long)]
    pub json: bool,

    /// List known category slugs and exit
    #[arg(long)]
    pub list_categories: bool,
}

pub fn execute(args: SearchArgs) -> Result<()> {
    if args.list_categories {
        for cat in CATEGORIES.iter().skip(1) {
            println!("{:<20} {}", cat.slug, cat.name.dimmed());
        }
        return Ok(());
    }

    let client = Client::new()?;
    let keyword = args.keyword.as_deref().unwrap_or("");
    let jobs = match client.search(keyword, &args.category) {
        Ok(jobs) => jobs,
        Err(e) => {
            log::warn!("search failed: {e}");
            anyhow::bail!("Failed to fetch jobs. Please try again.");
        }
    };

    if jobs.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    let total = pager::total_pages(jobs.len());
    let page = args.page.clamp(1, total);
    let slice = &jobs[pager::page_range(page, jobs.len())];

    if args.json {
        println!("{}", serde_json::to_string_pretty(slice)?);
        return Ok(());
    }

    let width = terminal_width();
    for job in slice {
        let card = JobCard::from_job(job);
        for line in card_lines(&card, width) {
            println!("{line}");
        }
        println!();
    }
    println!(
        "{}",
        format!("Page {page} of {total} ({} jobs)", jobs.len()).dimmed()
    );
    Ok(())
}

/// Format one card. Layout mirrors the TUI card: title line, summary line,
/// posted/salary line, tag line, apply URL.
fn card_lines(card: &JobCard, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!(
        "{}{}{} {}",
        "[".dimmed(),
        card.glyph.to_string().green(),
        "]".dimmed(),
        truncate_text(&card.title, width.saturating_sub(4)).bold()
    ));

    let meta = format!("{} · {}", card.company, card.summary);
    lines.push(format!(
        "    {}",
        truncate_text(&meta, width.saturating_sub(4)).dimmed()
    ));

    let salary = if card.salary == crate::view::UNKNOWN_SALARY {
        card.salary.dimmed().italic().to_string()
    } else {
        card.salary.yellow().to_string()
    };
    lines.push(format!("    {} · {}", card.posted.dimmed(), salary));

    if !card.tags.is_empty() {
        let mut tag_line = card.tags.join(" · ").cyan().to_string();
        if card.tag_overflow > 0 {
            tag_line.push_str(&format!(" +{}", card.tag_overflow).dimmed().to_string());
        }
        lines.push(format!("    {tag_line}"));
    }

    lines.push(format!("    {}", card.apply_url.blue().underline()));

    lines
}

fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

fn truncate_text(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let mut result = String::new();
    let mut width = 0;

    for ch in text.chars() {
        let char_width = ch.width().unwrap_or(0);
        if width + char_width + 3 > max_width {
            break;
        }
        result.push(ch);
        width += char_width;
    }

    result.push_str("...");
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_leaves_short_text_alone() {
        assert_eq!(truncate_text("Rust Engineer", 40), "Rust Engineer");
    }

    #[test]
    fn truncate_appends_ellipsis() {
        let out = truncate_text("Principal Distributed Systems Engineer", 20);
        assert!(out.ends_with("..."));
        assert!(out.width() <= 20);
    }
}
