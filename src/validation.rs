//! Form Guards
//!
//! Checks run before a form is submitted. Each returns the request body on
//! success so the caller never sends an unchecked payload.

use crate::api::books::NewBook;
use crate::api::color_combos::NewCombo;
use crate::api::color_palettes::NewPalette;
use crate::api::colored_pencil_sets::NewCustomSet;
use crate::api::inspiration::NewInspiration;
use crate::api::journal_entries::JournalEntryArgs;
use crate::calendar;
use crate::color;
use crate::error::ValidationError;
use crate::media;
use crate::models::InspirationKind;

fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() { None } else { Some(t.to_string()) }
}

pub fn combo(title: &str, pencil_ids: &[u32]) -> Result<NewCombo, ValidationError> {
    let title = non_empty(title).ok_or(ValidationError::MissingTitle)?;
    if pencil_ids.is_empty() {
        return Err(ValidationError::NoColors);
    }
    Ok(NewCombo { title, pencils: pencil_ids.to_vec() })
}

/// `count` is the raw text of the size field
pub fn custom_set(name: &str, brand: &str, count: &str, color_ids: &[u32]) -> Result<NewCustomSet, ValidationError> {
    let name = non_empty(name).ok_or(ValidationError::MissingName)?;
    let count: u32 = count.trim().parse().ok().filter(|c| *c > 0).ok_or(ValidationError::InvalidCount)?;
    if color_ids.len() != count as usize {
        return Err(ValidationError::CountMismatch { selected: color_ids.len(), expected: count as usize });
    }
    Ok(NewCustomSet {
        name,
        brand: brand.trim().to_string(),
        count,
        colors: color_ids.to_vec(),
    })
}

/// `base_color` is None when the user did not pick one
pub fn palette(title: &str, base_color: Option<&str>, color_ids: &[u32]) -> Result<NewPalette, ValidationError> {
    let title = non_empty(title).ok_or(ValidationError::MissingTitle)?;
    if color_ids.is_empty() {
        return Err(ValidationError::NoColors);
    }
    // An unparseable base color is dropped rather than sent
    let base_color = base_color.and_then(|hex| color::parse_hex(hex).ok()).map(|rgb| rgb.to_hex());
    Ok(NewPalette { title, colors: color_ids.to_vec(), base_color })
}

pub fn book(title: &str, author: &str) -> Result<NewBook, ValidationError> {
    let title = non_empty(title).ok_or(ValidationError::MissingTitle)?;
    Ok(NewBook { title, author: non_empty(author) })
}

/// `source` is a YouTube link/id for videos, an image URL for files
pub fn inspiration(kind: InspirationKind, title: &str, source: &str) -> Result<NewInspiration, ValidationError> {
    let title = non_empty(title).ok_or(ValidationError::MissingTitle)?;
    match kind {
        InspirationKind::Video => {
            let id = media::youtube_id(source).ok_or(ValidationError::InvalidVideo)?;
            Ok(NewInspiration { kind, title, embed_id: Some(id), path: None })
        }
        InspirationKind::File => {
            let path = non_empty(source).ok_or(ValidationError::MissingPath)?;
            Ok(NewInspiration { kind, title, embed_id: None, path: Some(path) })
        }
    }
}

/// Date must be `YYYY-MM-DD`; empty notes are sent as null
pub fn journal_entry(mut args: JournalEntryArgs) -> Result<JournalEntryArgs, ValidationError> {
    let date = calendar::parse_iso(&args.date).ok_or(ValidationError::MissingDate)?;
    args.date = calendar::iso(date);
    args.notes = args.notes.as_deref().and_then(non_empty);
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combo_without_pencils_is_blocked() {
        assert_eq!(combo("Sunset", &[]), Err(ValidationError::NoColors));
        assert_eq!(ValidationError::NoColors.to_string(), "Please select at least one color");
    }

    #[test]
    fn test_combo_without_title_is_blocked() {
        assert_eq!(combo("   ", &[1]), Err(ValidationError::MissingTitle));
    }

    #[test]
    fn test_combo_payload() {
        let payload = combo(" Sunset ", &[4, 9]).unwrap();
        assert_eq!(payload, NewCombo { title: "Sunset".to_string(), pencils: vec![4, 9] });
        assert_eq!(serde_json::to_string(&payload).unwrap(), r#"{"title":"Sunset","pencils":[4,9]}"#);
    }

    #[test]
    fn test_custom_set_count_must_match() {
        assert_eq!(
            custom_set("Mine", "Custom", "3", &[1, 2]),
            Err(ValidationError::CountMismatch { selected: 2, expected: 3 })
        );
        assert_eq!(custom_set("Mine", "", "zero", &[]), Err(ValidationError::InvalidCount));
        assert_eq!(custom_set("Mine", "", "0", &[]), Err(ValidationError::InvalidCount));
        assert_eq!(custom_set("", "", "2", &[1, 2]), Err(ValidationError::MissingName));

        let ok = custom_set("Mine", " Custom ", "2", &[1, 2]).unwrap();
        assert_eq!(ok.count, 2);
        assert_eq!(ok.brand, "Custom");
    }

    #[test]
    fn test_palette_normalizes_base_color() {
        let p = palette("Ocean", Some("0AF"), &[1]).unwrap();
        assert_eq!(p.base_color.as_deref(), Some("#00aaff"));
        let p = palette("Ocean", Some(""), &[1]).unwrap();
        assert_eq!(p.base_color, None);
        assert_eq!(palette("Ocean", Some("#000"), &[]), Err(ValidationError::NoColors));
    }

    #[test]
    fn test_palette_without_base_color() {
        let p = palette("Ocean", None, &[1, 2]).unwrap();
        assert_eq!(p.base_color, None);
        let body = serde_json::to_value(&p).unwrap();
        assert!(body.get("base_color").is_none());
    }

    #[test]
    fn test_book_author_optional() {
        assert_eq!(book("Secret Garden", " ").unwrap().author, None);
        assert_eq!(book("", "Johanna Basford"), Err(ValidationError::MissingTitle));
    }

    #[test]
    fn test_inspiration_video_and_file() {
        let v = inspiration(InspirationKind::Video, "Lesson", "https://youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(v.embed_id.as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(
            inspiration(InspirationKind::Video, "Lesson", "not a video"),
            Err(ValidationError::InvalidVideo)
        );
        let f = inspiration(InspirationKind::File, "Photo", " https://img.test/a.jpg ").unwrap();
        assert_eq!(f.path.as_deref(), Some("https://img.test/a.jpg"));
        assert_eq!(inspiration(InspirationKind::File, "Photo", ""), Err(ValidationError::MissingPath));
    }

    #[test]
    fn test_journal_entry_needs_date() {
        let args = JournalEntryArgs { date: "".to_string(), ..Default::default() };
        assert_eq!(journal_entry(args), Err(ValidationError::MissingDate));

        let args = JournalEntryArgs { date: "2024-05-01".to_string(), notes: Some("  ".to_string()), ..Default::default() };
        let ok = journal_entry(args).unwrap();
        assert_eq!(ok.notes, None);
    }
}
