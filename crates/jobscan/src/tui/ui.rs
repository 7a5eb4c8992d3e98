//! UI rendering.

use super::app::{App, EMPTY_NOTICE, ERROR_NOTICE, SearchState};
use crate::view::{self, JobCard, JobDetail};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, StatefulWidget},
};
use std::time::{Duration, Instant};

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Results area (cards or a single notice)
            Constraint::Length(1), // Page status line
            Constraint::Length(1), // Status bar (shortcuts)
            Constraint::Length(1), // Toast line
            Constraint::Length(1), // Search input
        ])
        .split(frame.area());

    render_results(frame, app, chunks[0]);
    render_page_line(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);
    render_toast_line(frame, app, chunks[3]);
    render_search_input(frame, app, chunks[4]);

    if app.overlay.is_some() {
        render_overlay(frame, app);
    } else {
        app.overlay_area = None;
    }
}

/// The results area shows exactly one thing: the loading indicator, a notice,
/// or the cards of the current page.
fn render_results(frame: &mut Frame, app: &mut App, area: Rect) {
    match app.state {
        SearchState::Idle => {}
        SearchState::Loading { started_at } => {
            let text = format!("{} Loading...", spinner_frame(started_at));
            render_notice(frame, area, &text, Style::default().fg(Color::Yellow));
        }
        SearchState::Empty => {
            render_notice(frame, area, EMPTY_NOTICE, Style::default().fg(Color::DarkGray));
        }
        SearchState::Error => {
            render_notice(frame, area, ERROR_NOTICE, Style::default().fg(Color::Red));
        }
        SearchState::Results => render_card_list(frame, app, area),
    }
}

/// Single centered message panel.
fn render_notice(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let mid = Rect {
        y: area.y + area.height / 2,
        height: 1.min(area.height),
        ..area
    };
    let para = Paragraph::new(text).style(style).centered();
    frame.render_widget(para, mid);
}

fn render_card_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let selection_bg = Color::Rgb(38, 38, 38);
    let selected_index = app.list_state.selected();

    let slice = &app.jobs[app.pager.range()];
    let items: Vec<ListItem<'static>> = slice
        .iter()
        .enumerate()
        .map(|(i, job)| {
            let is_selected = selected_index == Some(i);
            let card = JobCard::from_job(job);

            let base_style = if is_selected {
                Style::default().bg(selection_bg)
            } else {
                Style::default()
            };
            let prefix_style = if is_selected {
                Style::default().fg(Color::LightRed).bg(selection_bg)
            } else {
                Style::default()
            };

            let item = ListItem::new(card_lines(&card, is_selected, base_style, prefix_style));
            if is_selected {
                item.style(Style::default().bg(selection_bg))
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items);
    StatefulWidget::render(list, area, frame.buffer_mut(), &mut app.list_state);
}

/// Lines for one result card: glyph + title, company + summary, posted +
/// salary, and a tag line when the listing has tags.
fn card_lines(
    card: &JobCard,
    is_selected: bool,
    base_style: Style,
    prefix_style: Style,
) -> Vec<Line<'static>> {
    let prefix = if is_selected { "▌" } else { " " };

    let title_style = if is_selected {
        base_style.fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        base_style.fg(Color::White).add_modifier(Modifier::BOLD)
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(prefix.to_string(), prefix_style),
        Span::styled(" [", base_style.fg(Color::DarkGray)),
        Span::styled(card.glyph.to_string(), base_style.fg(Color::Green)),
        Span::styled("] ", base_style.fg(Color::DarkGray)),
        Span::styled(card.title.clone(), title_style),
    ])];

    lines.push(Line::from(vec![
        Span::styled(prefix.to_string(), prefix_style),
        Span::styled("     ".to_string(), base_style),
        Span::styled(card.company.clone(), base_style.fg(Color::Gray)),
        Span::styled(" · ".to_string(), base_style.fg(Color::DarkGray)),
        Span::styled(card.summary.clone(), base_style.fg(Color::DarkGray)),
    ]));

    let salary_span = if card.salary == view::UNKNOWN_SALARY {
        Span::styled(
            card.salary.clone(),
            base_style.fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )
    } else {
        Span::styled(card.salary.clone(), base_style.fg(Color::Yellow))
    };
    lines.push(Line::from(vec![
        Span::styled(prefix.to_string(), prefix_style),
        Span::styled("     ".to_string(), base_style),
        Span::styled(card.posted.clone(), base_style.fg(Color::DarkGray)),
        Span::styled(" · ".to_string(), base_style.fg(Color::DarkGray)),
        salary_span,
    ]));

    if !card.tags.is_empty() {
        let mut spans = vec![
            Span::styled(prefix.to_string(), prefix_style),
            Span::styled("     ".to_string(), base_style),
            Span::styled(
                card.tags.join(" · "),
                base_style.fg(Color::Cyan).add_modifier(Modifier::DIM),
            ),
        ];
        if card.tag_overflow > 0 {
            spans.push(Span::styled(
                format!(" +{}", card.tag_overflow),
                base_style.fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(spans));
    }

    lines
}

/// `Page X of Y` with prev/next affordances; hidden outside of Results.
fn render_page_line(frame: &mut Frame, app: &App, area: Rect) {
    if app.state != SearchState::Results {
        return;
    }

    let dim = Style::default().fg(Color::DarkGray);
    let enabled = Style::default().fg(Color::White);
    let disabled = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::DIM);

    let mut spans = vec![Span::styled(
        format!(
            "  Page {} of {} · {} jobs",
            app.pager.page(),
            app.pager.total_pages(),
            app.pager.count()
        ),
        dim,
    )];
    if let Some(duration) = app.last_fetch {
        spans.push(Span::styled(
            format!(" ({})", format_duration(duration)),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::DIM),
        ));
    }
    spans.push(Span::styled("   ", dim));
    spans.push(Span::styled(
        "‹ prev",
        if app.pager.has_prev() { enabled } else { disabled },
    ));
    spans.push(Span::styled("  ", dim));
    spans.push(Span::styled(
        "next ›",
        if app.pager.has_next() { enabled } else { disabled },
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let key = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::DIM);

    let spans = vec![
        Span::styled("  [enter]", key),
        Span::styled(" search ", dim),
        Span::styled("[tab]", key),
        Span::styled(" ", dim),
        Span::styled(
            app.current_category().name,
            Style::default().fg(Color::Cyan),
        ),
        Span::styled("  [↑↓]", key),
        Span::styled(" select ", dim),
        Span::styled("[pgup/pgdn]", key),
        Span::styled(" page ", dim),
        Span::styled("[^p]", key),
        Span::styled(" preview ", dim),
        Span::styled("[^o]", key),
        Span::styled(" apply ", dim),
        Span::styled("[esc]", key),
        Span::styled(" quit", dim),
    ];

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_toast_line(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(ref toast) = app.toast {
        let bracket = Style::default().fg(Color::DarkGray);
        let toast_style = if toast.is_error {
            Style::default().fg(Color::Red).add_modifier(Modifier::DIM)
        } else {
            Style::default().fg(Color::Blue).add_modifier(Modifier::DIM)
        };

        let spans = vec![
            Span::styled("  [", bracket),
            Span::styled(toast.message.clone(), toast_style),
            Span::styled("]", bracket),
        ];
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

/// Single-line search input with a block cursor.
fn render_search_input(frame: &mut Frame, app: &App, area: Rect) {
    let cursor_style = Style::default().fg(Color::White).bg(Color::DarkGray);
    let text_style = Style::default().fg(Color::White);

    let (before, after) = app.search_input.text.split_at(app.search_input.cursor);
    let cursor_char = after.chars().next();
    let after_cursor = cursor_char.map(|c| &after[c.len_utf8()..]).unwrap_or("");

    let mut spans = vec![Span::styled("▌ ", Style::default().fg(Color::Yellow))];
    if !before.is_empty() {
        spans.push(Span::styled(before.to_string(), text_style));
    }
    if let Some(c) = cursor_char {
        spans.push(Span::styled(c.to_string(), cursor_style));
    } else {
        spans.push(Span::styled("█", Style::default().fg(Color::White)));
    }
    if !after_cursor.is_empty() {
        spans.push(Span::styled(after_cursor.to_string(), text_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Centered detail overlay for the listing the user opened.
fn render_overlay(frame: &mut Frame, app: &mut App) {
    let Some(overlay) = app.overlay else { return };
    let Some(job) = app.overlay_job().cloned() else {
        app.close_overlay();
        return;
    };
    let detail = JobDetail::from_job(&job);

    let area = frame.area();
    let width = (area.width * 80 / 100)
        .max(40)
        .min(area.width.saturating_sub(4));
    let height = (area.height * 80 / 100)
        .max(10)
        .min(area.height.saturating_sub(2));
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    let modal_area = Rect::new(x, y, width, height);
    app.overlay_area = Some(modal_area);

    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", detail.title))
        .title_bottom(
            Line::from(" [esc] close · [^o] apply · [↑↓] scroll ")
                .style(Style::default().fg(Color::DarkGray))
                .right_aligned(),
        );
    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let label_style = Style::default().fg(Color::DarkGray);
    let value_style = Style::default().fg(Color::White);
    let wrap_width = inner.width.saturating_sub(2) as usize;

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled("[", label_style),
        Span::styled(detail.glyph.to_string(), Style::default().fg(Color::Green)),
        Span::styled("] ", label_style),
        Span::styled(
            detail.company.clone(),
            value_style.add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(Span::styled(detail.summary.clone(), label_style)));
    lines.push(Line::from(Span::styled(detail.posted.clone(), label_style)));
    lines.push(Line::from(""));

    // Salary absence stays visible here too, same policy as the cards
    let salary_span = if detail.salary == view::UNKNOWN_SALARY {
        Span::styled(
            detail.salary.clone(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )
    } else {
        Span::styled(detail.salary.clone(), Style::default().fg(Color::Yellow))
    };
    lines.push(Line::from(vec![
        Span::styled("Salary  ", label_style),
        salary_span,
    ]));

    if !detail.tags.is_empty() {
        let tags = detail.tags.join(" · ");
        for (i, chunk) in view::wrap_text(&tags, wrap_width.saturating_sub(8)).into_iter().enumerate() {
            let label = if i == 0 { "Tags    " } else { "        " };
            lines.push(Line::from(vec![
                Span::styled(label, label_style),
                Span::styled(chunk, Style::default().fg(Color::Cyan)),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "─".repeat(wrap_width.min(40)),
        label_style,
    )));

    for text in view::description_lines(&job, wrap_width) {
        lines.push(Line::from(Span::styled(text, value_style)));
    }

    let max_scroll = (lines.len() as u16).saturating_sub(inner.height);
    let scroll = overlay.scroll.min(max_scroll);

    let padded = Rect {
        x: inner.x + 1,
        y: inner.y,
        width: inner.width.saturating_sub(2),
        height: inner.height,
    };
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), padded);
}

fn spinner_frame(started_at: Instant) -> &'static str {
    const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    let elapsed = started_at.elapsed().as_millis() / 80;
    let idx = (elapsed as usize) % FRAMES.len();
    FRAMES[idx]
}

fn format_duration(d: Duration) -> String {
    let millis = d.as_millis();
    if millis < 1000 {
        format!("{millis}ms")
    } else {
        format!("{:.1}s", millis as f64 / 1000.0)
    }
}
