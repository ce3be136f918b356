//! Inspiration Endpoints

use serde::Serialize;

use super::{get_all_pages, post};
use crate::error::ApiError;
use crate::models::{Inspiration, InspirationKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewInspiration {
    #[serde(rename = "type")]
    pub kind: InspirationKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

pub async fn get_all() -> Result<Vec<Inspiration>, ApiError> {
    get_all_pages("inspirations").await
}

pub async fn create(args: &NewInspiration) -> Result<Inspiration, ApiError> {
    post("inspirations", args).await
}

pub async fn delete(id: u32) -> Result<(), ApiError> {
    super::delete(&format!("inspirations/{}", id)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_payload() {
        let args = NewInspiration {
            kind: InspirationKind::Video,
            title: "Autumn leaves".to_string(),
            embed_id: Some("dQw4w9WgXcQ".to_string()),
            path: None,
        };
        assert_eq!(
            serde_json::to_string(&args).unwrap(),
            r#"{"type":"video","title":"Autumn leaves","embed_id":"dQw4w9WgXcQ"}"#
        );
    }
}
