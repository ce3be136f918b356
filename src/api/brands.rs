//! Brand Endpoints

use super::get_all_pages;
use crate::error::ApiError;
use crate::models::Brand;

pub async fn get_all() -> Result<Vec<Brand>, ApiError> {
    get_all_pages("brands").await
}
