//! Color Palette Endpoints

use serde::Serialize;

use super::{get_all_pages, post};
use crate::error::ApiError;
use crate::models::ColorPalette;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPalette {
    pub title: String,
    /// Color ids
    pub colors: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_color: Option<String>,
}

pub async fn get_all() -> Result<Vec<ColorPalette>, ApiError> {
    get_all_pages("color-palettes").await
}

pub async fn create(args: &NewPalette) -> Result<ColorPalette, ApiError> {
    post("color-palettes", args).await
}

pub async fn delete(id: u32) -> Result<(), ApiError> {
    super::delete(&format!("color-palettes/{}", id)).await
}
