//! UI Components
//!
//! Reusable Leptos components.

mod add_set_modal;
mod color_grid;
mod combo_modal;
mod delete_confirm_button;
mod diagnostics_panel;
mod error_banner;
mod modal;
mod search_select;
mod set_picker;
mod tour_overlay;

pub use add_set_modal::AddSetModal;
pub use color_grid::{toggle_id, ColorGrid, Swatch};
pub use combo_modal::{toggle_pencil, ComboModal};
pub use delete_confirm_button::DeleteConfirmButton;
pub use diagnostics_panel::DiagnosticsPanel;
pub use error_banner::ErrorBanner;
pub use modal::Modal;
pub use search_select::SearchSelect;
pub use set_picker::{PickedSet, SetPicker};
pub use tour_overlay::{mark_tour_completed, reset_tour, start_tour, tour_completed, tour_steps, TourOverlay};
