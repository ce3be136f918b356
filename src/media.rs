//! Media Helpers
//!
//! YouTube id extraction and embed URLs for inspirations.

const YOUTUBE_ID_LEN: usize = 11;

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_id(s: &str) -> Option<String> {
    let id: String = s.chars().take_while(|c| is_id_char(*c)).collect();
    (id.len() == YOUTUBE_ID_LEN).then_some(id)
}

/// Host (without `www.`/`m.`) and the rest of a URL, scheme optional
fn split_host(input: &str) -> (&str, &str) {
    let rest = input
        .strip_prefix("https://")
        .or_else(|| input.strip_prefix("http://"))
        .unwrap_or(input);
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let (host, tail) = rest.split_at(end);
    let host = host.strip_prefix("www.").or_else(|| host.strip_prefix("m.")).unwrap_or(host);
    (host, tail)
}

/// Video id from a bare id, `youtu.be/<id>`, `watch?v=<id>`, `embed/<id>` or `shorts/<id>`.
/// Links on any other host are rejected.
pub fn youtube_id(input: &str) -> Option<String> {
    let input = input.trim();
    if input.len() == YOUTUBE_ID_LEN && input.chars().all(is_id_char) {
        return Some(input.to_string());
    }

    let (host, tail) = split_host(input);
    match host.to_ascii_lowercase().as_str() {
        "youtu.be" => take_id(tail.strip_prefix('/')?),
        "youtube.com" | "youtube-nocookie.com" => {
            for marker in ["/embed/", "/shorts/", "/v/"] {
                if let Some(id) = tail.strip_prefix(marker) {
                    return take_id(id);
                }
            }
            let query = tail.split_once('?')?.1;
            query
                .split(['&', '#'])
                .find_map(|pair| pair.strip_prefix("v="))
                .and_then(take_id)
        }
        _ => None,
    }
}

pub fn youtube_embed_url(id: &str) -> String {
    format!("https://www.youtube.com/embed/{}", id)
}

pub fn youtube_thumbnail_url(id: &str) -> String {
    format!("https://img.youtube.com/vi/{}/hqdefault.jpg", id)
}
