//! Color Combo Endpoints

use serde::Serialize;

use super::{get_all_pages, post, put};
use crate::error::ApiError;
use crate::models::ColorCombo;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCombo {
    pub title: String,
    /// Pencil ids
    pub pencils: Vec<u32>,
}

pub async fn get_all() -> Result<Vec<ColorCombo>, ApiError> {
    get_all_pages("color-combos").await
}

pub async fn create(args: &NewCombo) -> Result<ColorCombo, ApiError> {
    post("color-combos", args).await
}

pub async fn update(id: u32, args: &NewCombo) -> Result<ColorCombo, ApiError> {
    put(&format!("color-combos/{}", id), args).await
}

pub async fn delete(id: u32) -> Result<(), ApiError> {
    super::delete(&format!("color-combos/{}", id)).await
}
