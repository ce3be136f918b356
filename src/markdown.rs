//! Journal Notes Markdown
//!
//! pulldown-cmark with a few changes for user notes:
//! - Swatch syntax: `[[#c8102e]]` renders a color chip
//! - Raw HTML is shown as text, never injected
//! - Images are size-constrained, script links are neutralized

use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser, Tag, TagEnd};

use crate::color;

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

/// Render notes to HTML
pub fn render_notes(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let events = transform_events(parser);
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

enum State {
    Normal,
    /// Inside an image: alt text is dropped until the matching end
    InImage { depth: usize },
}

fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut text_buf = String::new();
    let mut state = State::Normal;

    for event in parser {
        if let State::InImage { ref mut depth } = state {
            match event {
                Event::Start(_) => *depth += 1,
                Event::End(_) if *depth == 0 => state = State::Normal,
                Event::End(_) => *depth -= 1,
                _ => {}
            }
            continue;
        }

        match event {
            // Text is merged first: the parser splits it around brackets
            Event::Text(t) | Event::Html(t) | Event::InlineHtml(t) => text_buf.push_str(&t),
            other => {
                flush_text(&mut text_buf, &mut events);
                match other {
                    Event::Start(Tag::Image { dest_url, .. }) => {
                        if let Some(url) = safe_url(&dest_url) {
                            events.push(Event::Html(CowStr::from(format!(
                                r#"<img class="note-image" src="{}" style="max-width: 100%; max-height: 320px; border-radius: 4px;" />"#,
                                escape_attr(&url)
                            ))));
                        }
                        state = State::InImage { depth: 0 };
                    }
                    Event::Start(Tag::Link { link_type, dest_url, title, id }) => {
                        let dest_url = match safe_url(&dest_url) {
                            Some(_) => dest_url,
                            None => CowStr::from("#"),
                        };
                        events.push(Event::Start(Tag::Link { link_type, dest_url, title, id }));
                    }
                    other => events.push(other),
                }
            }
        }
    }
    flush_text(&mut text_buf, &mut events);
    events
}

fn flush_text(buf: &mut String, events: &mut Vec<Event<'_>>) {
    if buf.is_empty() {
        return;
    }
    events.extend(swatch_events(buf));
    buf.clear();
}

/// Split text around `[[#hex]]` markers; invalid hex stays as text
fn swatch_events(text: &str) -> Vec<Event<'static>> {
    let mut events = Vec::new();
    let mut plain = String::new();
    let mut remaining = text;

    while let Some(start) = remaining.find("[[#") {
        let after = &remaining[start + 2..];
        let Some(end) = after.find("]]") else {
            break;
        };
        let candidate = &after[..end];
        match color::parse_hex(candidate) {
            Ok(rgb) => {
                plain.push_str(&remaining[..start]);
                if !plain.is_empty() {
                    events.push(Event::Text(CowStr::from(std::mem::take(&mut plain))));
                }
                events.push(Event::InlineHtml(CowStr::from(format!(
                    r#"<span class="swatch-chip" title="{hex}" style="background-color:{hex}"></span>"#,
                    hex = rgb.to_hex()
                ))));
            }
            Err(_) => plain.push_str(&remaining[..start + 2 + end + 2]),
        }
        remaining = &after[end + 2..];
    }
    plain.push_str(remaining);
    if !plain.is_empty() {
        events.push(Event::Text(CowStr::from(plain)));
    }
    events
}

/// http(s), protocol-relative and relative URLs only
fn safe_url(url: &str) -> Option<String> {
    let trimmed = url.trim();
    let lower = trimmed.to_ascii_lowercase();
    let has_scheme = lower.split_once(':').map_or(false, |(scheme, _)| {
        !scheme.is_empty() && scheme.chars().all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c))
    });
    if !has_scheme || lower.starts_with("http://") || lower.starts_with("https://") {
        Some(trimmed.to_string())
    } else {
        None
    }
}

fn escape_attr(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swatch_chip() {
        let html = render_notes("Base layer [[#C8102E]] then blend");
        assert_eq!(
            html.trim(),
            r##"<p>Base layer <span class="swatch-chip" title="#c8102e" style="background-color:#c8102e"></span> then blend</p>"##
        );
    }

    #[test]
    fn test_short_hex_swatch() {
        let html = render_notes("[[#0f8]]");
        assert!(html.contains("background-color:#00ff88"));
    }

    #[test]
    fn test_invalid_swatch_stays_text() {
        let html = render_notes("[[#nothex]] and [[#12]]");
        assert!(html.contains("[[#nothex]] and [[#12]]"));
        assert!(!html.contains("swatch-chip"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_notes("<script>alert(1)</script> hi <b>bold</b>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;b&gt;"));
    }

    #[test]
    fn test_images_are_constrained_and_alt_dropped() {
        let html = render_notes("![my *page*](https://img.test/page.jpg)");
        assert!(html.contains(r#"<img class="note-image" src="https://img.test/page.jpg""#));
        assert!(!html.contains("my"));
    }

    #[test]
    fn test_script_links_neutralized() {
        let html = render_notes("[click](javascript:alert(1)) [ok](/log)");
        assert!(html.contains(r##"<a href="#">click</a>"##));
        assert!(html.contains(r#"<a href="/log">ok</a>"#));
    }

    #[test]
    fn test_markdown_features() {
        let html = render_notes("- [x] burnish\n- ~~solvent~~");
        assert!(html.contains("checkbox"));
        assert!(html.contains("<del>solvent</del>"));
    }
}
