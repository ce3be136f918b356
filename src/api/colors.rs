//! Color Endpoints

use super::get_all_pages;
use crate::error::ApiError;
use crate::models::Color;

pub async fn get_all() -> Result<Vec<Color>, ApiError> {
    get_all_pages("colors").await
}
