use chrono::{DateTime, Utc};
use codeshelfapp::commands::{CmdMessage, MessageLevel};
use codeshelfapp::model::{Banner, Category, CodeSnippet};
use colored::Colorize;
use std::fmt::Write;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 16;
const LANGUAGE_WIDTH: usize = 6;
const CATEGORY_WIDTH: usize = 16;
const ACTIVE_MARKER: &str = "●";
const INACTIVE_MARKER: &str = "○";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

/// One line per snippet: id, title and description, language, category and
/// how long ago it was last updated.
pub(super) fn render_snippet_list(snippets: &[CodeSnippet], now: DateTime<Utc>) -> String {
    let mut out = String::new();
    if snippets.is_empty() {
        return out;
    }

    let id_width = snippets.iter().map(|s| s.id.width()).max().unwrap_or(0);
    let fixed = id_width + 2 + LANGUAGE_WIDTH + 1 + CATEGORY_WIDTH + 1 + TIME_WIDTH;
    let available = LINE_WIDTH.saturating_sub(fixed);

    for snippet in snippets {
        let summary = if snippet.description.is_empty() {
            snippet.title.clone()
        } else {
            format!("{} - {}", snippet.title, single_line(&snippet.description))
        };
        let summary = pad_to_width(&truncate_to_width(&summary, available), available);
        let category = pad_to_width(
            &truncate_to_width(&snippet.category, CATEGORY_WIDTH),
            CATEGORY_WIDTH,
        );
        let language = pad_to_width(&snippet.language, LANGUAGE_WIDTH);
        let time_ago = format!(
            "{:>width$}",
            format_time_ago(snippet.updated_at, now),
            width = TIME_WIDTH
        );

        let _ = writeln!(
            out,
            "{}  {}{} {} {}",
            pad_to_width(&snippet.id, id_width).yellow(),
            summary,
            language.cyan(),
            category,
            time_ago.dimmed()
        );
    }
    out
}

pub(super) fn render_snippet_full(snippet: &CodeSnippet, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", snippet.id.yellow(), snippet.title.bold());
    if !snippet.description.is_empty() {
        let _ = writeln!(out, "{}", snippet.description);
    }
    let _ = writeln!(
        out,
        "{}",
        format!(
            "{} · {} · {} line(s) · updated {}",
            snippet.language,
            snippet.category,
            snippet.line_count(),
            format_time_ago(snippet.updated_at, now)
        )
        .dimmed()
    );
    let _ = writeln!(out, "{}", format!("cover: {}", snippet.cover_image_or_default()).dimmed());
    let _ = writeln!(out, "--------------------------------");
    let _ = writeln!(out, "{}", snippet.code);
    out
}

/// Categories with how many snippets each one holds.
pub(super) fn render_categories(categories: &[Category], snippets: &[CodeSnippet]) -> String {
    let mut out = String::new();
    let id_width = categories.iter().map(|c| c.id.width()).max().unwrap_or(0);
    let name_width = categories
        .iter()
        .map(|c| c.name.width())
        .max()
        .unwrap_or(0)
        .min(LINE_WIDTH / 2);

    for category in categories {
        let count = snippets.iter().filter(|s| s.category == category.name).count();
        let _ = writeln!(
            out,
            "{}  {}  {:<12} {}",
            pad_to_width(&category.id, id_width).yellow(),
            pad_to_width(&truncate_to_width(&category.name, name_width), name_width).bold(),
            category.icon,
            format!("{} snippet(s)", count).dimmed()
        );
    }
    out
}

pub(super) fn render_banners(banners: &[Banner]) -> String {
    let mut out = String::new();
    let id_width = banners.iter().map(|b| b.id.width()).max().unwrap_or(0);

    for banner in banners {
        let marker = if banner.is_active {
            ACTIVE_MARKER.green()
        } else {
            INACTIVE_MARKER.dimmed()
        };
        let link = banner
            .link
            .as_deref()
            .map(|l| format!(" -> {}", l))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{} {}  {}{}",
            marker,
            pad_to_width(&banner.id, id_width).yellow(),
            banner.image_url,
            link.dimmed()
        );
    }
    out
}

fn single_line(s: &str) -> String {
    s.chars().map(|c| if c == '\n' { ' ' } else { c }).collect()
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn snippet(id: &str, title: &str) -> CodeSnippet {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        CodeSnippet {
            id: id.into(),
            title: title.into(),
            description: "line one\nline two".into(),
            code: "<a>\n</a>".into(),
            language: "HTML".into(),
            category: "General".into(),
            created_at: at,
            updated_at: at,
            ..Default::default()
        }
    }

    #[test]
    fn truncate_respects_wide_chars() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        let wide = truncate_to_width("日本語のテキスト", 7);
        assert!(wide.width() <= 7);
        assert!(wide.ends_with('…'));
    }

    #[test]
    fn list_line_fits_width() {
        colored::control::set_override(false);
        let long = snippet("100", &"Very long title ".repeat(10));
        let now = long.updated_at + Duration::hours(2);
        let out = render_snippet_list(&[long], now);
        let line = out.lines().next().unwrap();
        assert!(line.width() <= LINE_WIDTH);
        assert!(line.contains("2 hours ago"));
        assert!(!line.contains('\n'));
    }

    #[test]
    fn full_view_includes_code_and_cover_fallback() {
        colored::control::set_override(false);
        let s = snippet("7", "Link");
        let out = render_snippet_full(&s, s.updated_at);
        assert!(out.contains("<a>\n</a>"));
        assert!(out.contains("2 line(s)"));
        assert!(out.contains(codeshelfapp::model::DEFAULT_COVER_IMAGE));
    }

    #[test]
    fn categories_show_counts() {
        colored::control::set_override(false);
        let cats = codeshelfapp::model::default_categories();
        let out = render_categories(&cats, &[snippet("1", "A"), snippet("2", "B")]);
        assert!(out.lines().next().unwrap().contains("2 snippet(s)"));
        assert!(out.contains("0 snippet(s)"));
    }
}
