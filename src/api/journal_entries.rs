//! Journal Entry Endpoints

use serde::{Deserialize, Serialize};

use super::{api_get, get_all_pages, post, put, with_query};
use crate::error::ApiError;
use crate::models::JournalEntry;

/// Body for create and update
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JournalEntryArgs {
    pub date: String,
    pub inspiration_id: Option<u32>,
    pub book_id: Option<u32>,
    pub colored_pencil_set_id: Option<u32>,
    pub pencils: Vec<u32>,
    pub palettes: Vec<u32>,
    pub combos: Vec<u32>,
    pub notes: Option<String>,
}

impl From<&JournalEntry> for JournalEntryArgs {
    fn from(entry: &JournalEntry) -> Self {
        Self {
            date: entry.date.get(..10).unwrap_or(&entry.date).to_string(),
            inspiration_id: entry.inspiration_id,
            book_id: entry.book_id,
            colored_pencil_set_id: entry.colored_pencil_set_id,
            pencils: entry.pencils.clone(),
            palettes: entry.palettes.clone(),
            combos: entry.combos.clone(),
            notes: entry.notes.clone(),
        }
    }
}

/// The dates endpoint answers either `["2024-05-01", ...]` or `{"dates": [...]}`
#[derive(Deserialize)]
#[serde(untagged)]
enum DatesResponse {
    Wrapped { dates: Vec<String> },
    Bare(Vec<String>),
}

pub async fn get_by_date(iso_date: &str) -> Result<Vec<JournalEntry>, ApiError> {
    get_all_pages(&with_query("journal-entries", &[("date", iso_date.to_string())])).await
}

/// Every date that has at least one entry
pub async fn get_dates() -> Result<Vec<String>, ApiError> {
    let dates: DatesResponse = api_get("journal-entries/dates").await?;
    Ok(match dates {
        DatesResponse::Wrapped { dates } | DatesResponse::Bare(dates) => dates,
    })
}

pub async fn create(args: &JournalEntryArgs) -> Result<JournalEntry, ApiError> {
    post("journal-entries", args).await
}

pub async fn update(id: u32, args: &JournalEntryArgs) -> Result<JournalEntry, ApiError> {
    put(&format!("journal-entries/{}", id), args).await
}

pub async fn delete(id: u32) -> Result<(), ApiError> {
    super::delete(&format!("journal-entries/{}", id)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dates_response_shapes() {
        let bare: DatesResponse = serde_json::from_str(r#"["2024-05-01"]"#).unwrap();
        let wrapped: DatesResponse = serde_json::from_str(r#"{"dates":["2024-05-01","2024-05-02"]}"#).unwrap();
        assert!(matches!(bare, DatesResponse::Bare(d) if d.len() == 1));
        assert!(matches!(wrapped, DatesResponse::Wrapped { dates } if dates.len() == 2));
    }

    #[test]
    fn test_args_from_entry_trims_timestamp() {
        let entry: JournalEntry = serde_json::from_str(
            r#"{"id":4,"date":"2024-05-01T00:00:00.000000Z","book_id":2,"pencils":[5,6],"notes":"Blended with solvent"}"#,
        )
        .unwrap();
        let args = JournalEntryArgs::from(&entry);
        assert_eq!(args.date, "2024-05-01");
        assert_eq!(args.book_id, Some(2));
        assert_eq!(args.pencils, vec![5, 6]);
        assert!(args.palettes.is_empty());
    }
}
