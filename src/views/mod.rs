//! Views
//!
//! One top-level component per route.

mod color_along;
mod colorist_log;
mod conversion;
mod login;
mod studio;

pub use color_along::ColorAlongView;
pub use colorist_log::ColoristLogView;
pub use conversion::ConversionView;
pub use login::LoginView;
pub use studio::StudioView;
