//! Coloring Book Endpoints

use serde::Serialize;

use super::{get_all_pages, post};
use crate::error::ApiError;
use crate::models::Book;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBook {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

pub async fn get_all() -> Result<Vec<Book>, ApiError> {
    get_all_pages("books").await
}

pub async fn create(args: &NewBook) -> Result<Book, ApiError> {
    post("books", args).await
}

pub async fn delete(id: u32) -> Result<(), ApiError> {
    super::delete(&format!("books/{}", id)).await
}
