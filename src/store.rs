//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{Brand, Pencil, PencilSet, User};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Signed-in user, once `me` has answered
    pub user: Option<User>,
    /// Sets in the user's collection
    pub my_sets: Vec<PencilSet>,
    /// All brands, shared by every set picker
    pub brands: Vec<Brand>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Add a set to the collection, replacing one with the same ID
pub fn store_upsert_set(store: &AppStore, set: PencilSet) {
    let sets = store.my_sets();
    let mut sets = sets.write();
    match sets.iter_mut().find(|s| s.id == set.id) {
        Some(existing) => *existing = set,
        None => sets.push(set),
    }
}

/// Remove a set from the collection by ID
pub fn store_remove_set(store: &AppStore, set_id: u32) {
    store.my_sets().write().retain(|s| s.id != set_id);
}

/// Replace a pencil wherever it appears in the collection
pub fn store_update_pencil(store: &AppStore, updated: Pencil) {
    apply_pencil_update(&mut store.my_sets().write(), &updated);
}

/// Pencil lookup across the collection
pub fn store_find_pencil(store: &AppStore, pencil_id: u32) -> Option<Pencil> {
    store
        .my_sets()
        .read()
        .iter()
        .flat_map(|s| s.pencils().iter())
        .find(|p| p.id == pencil_id)
        .cloned()
}

/// Returns true if any pencil was replaced
pub fn apply_pencil_update(sets: &mut [PencilSet], updated: &Pencil) -> bool {
    let mut found = false;
    for set in sets.iter_mut() {
        if let Some(pencils) = set.pencils.as_mut() {
            for pencil in pencils.iter_mut().filter(|p| p.id == updated.id) {
                *pencil = updated.clone();
                found = true;
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BrandRef, Color};

    fn pencil(id: u32, inventory: Option<i32>) -> Pencil {
        Pencil {
            id,
            color_name: format!("Color {}", id),
            color_number: None,
            color: Color { id, name: None, hex: "#abcdef".to_string() },
            inventory,
        }
    }

    #[test]
    fn test_apply_pencil_update() {
        let mut sets = vec![
            PencilSet { id: 1, name: "A".into(), brand: BrandRef::default(), count: 2, pencils: Some(vec![pencil(1, Some(4)), pencil(2, Some(1))]) },
            PencilSet { id: 2, name: "B".into(), brand: BrandRef::default(), count: 0, pencils: None },
        ];
        assert!(apply_pencil_update(&mut sets, &pencil(2, Some(0))));
        assert!(sets[0].pencils()[1].is_out_of_stock());
        assert!(!sets[0].pencils()[0].is_out_of_stock());
        assert!(!apply_pencil_update(&mut sets, &pencil(99, Some(0))));
    }
}
