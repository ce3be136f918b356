//! Brand → Set → Size Picker State
//!
//! One state machine behind every set picker in the app. Fetching is done by
//! the component; this type only decides what the fetched data means.
//! Each selection bumps a generation counter so a slow response for an old
//! brand or set cannot overwrite the current one.

use crate::models::{Brand, PencilSet, PencilSetSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerStep {
    Brand,
    Set,
    Size,
}

/// Resolved choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetSelection {
    pub set_id: u32,
    /// None when the set has no size variants
    pub size_id: Option<u32>,
}

/// Handle for one in-flight fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    pub id: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetPicker {
    step: PickerStep,
    brand_id: Option<u32>,
    set_id: Option<u32>,
    size_id: Option<u32>,
    brands: Vec<Brand>,
    sets: Vec<PencilSet>,
    sizes: Vec<PencilSetSize>,
    generation: u64,
    loading: bool,
    error: Option<String>,
}

impl Default for SetPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl SetPicker {
    pub fn new() -> Self {
        Self {
            step: PickerStep::Brand,
            brand_id: None,
            set_id: None,
            size_id: None,
            brands: Vec::new(),
            sets: Vec::new(),
            sizes: Vec::new(),
            generation: 0,
            loading: false,
            error: None,
        }
    }

    pub fn step(&self) -> PickerStep {
        self.step
    }

    pub fn brand_id(&self) -> Option<u32> {
        self.brand_id
    }

    pub fn set_id(&self) -> Option<u32> {
        self.set_id
    }

    pub fn size_id(&self) -> Option<u32> {
        self.size_id
    }

    pub fn brands(&self) -> &[Brand] {
        &self.brands
    }

    pub fn sets(&self) -> &[PencilSet] {
        &self.sets
    }

    pub fn sizes(&self) -> &[PencilSetSize] {
        &self.sizes
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn brand_name(&self) -> Option<&str> {
        let id = self.brand_id?;
        self.brands.iter().find(|b| b.id == id).map(|b| b.name.as_str())
    }

    pub fn selected_set(&self) -> Option<&PencilSet> {
        let id = self.set_id?;
        self.sets.iter().find(|s| s.id == id)
    }

    /// The resolved choice, once a size was picked (or the set has none)
    pub fn selection(&self) -> Option<SetSelection> {
        let set_id = self.set_id?;
        if self.step != PickerStep::Size {
            return None;
        }
        if self.size_id.is_some() || (!self.loading && self.sizes.is_empty() && self.error.is_none()) {
            Some(SetSelection { set_id, size_id: self.size_id })
        } else {
            None
        }
    }

    /// Brand list is loaded once and survives every transition
    pub fn brands_loaded(&mut self, brands: Vec<Brand>) {
        self.brands = brands;
    }

    /// The brand list itself could not be fetched
    pub fn brands_failed(&mut self, message: &str) {
        self.loading = false;
        self.error = Some(message.to_string());
    }

    /// Pick a brand: clears set, size and previously fetched data
    pub fn select_brand(&mut self, brand_id: u32) -> FetchTicket {
        self.brand_id = Some(brand_id);
        self.set_id = None;
        self.size_id = None;
        self.sets.clear();
        self.sizes.clear();
        self.step = PickerStep::Set;
        self.begin_fetch(brand_id)
    }

    /// Returns false when the response belongs to a stale selection
    pub fn sets_loaded(&mut self, ticket: FetchTicket, sets: Vec<PencilSet>) -> bool {
        if !self.is_current(ticket) || self.step != PickerStep::Set {
            return false;
        }
        self.sets = sets;
        self.loading = false;
        true
    }

    pub fn select_set(&mut self, set_id: u32) -> FetchTicket {
        self.set_id = Some(set_id);
        self.size_id = None;
        self.sizes.clear();
        self.step = PickerStep::Size;
        self.begin_fetch(set_id)
    }

    pub fn sizes_loaded(&mut self, ticket: FetchTicket, sizes: Vec<PencilSetSize>) -> bool {
        if !self.is_current(ticket) || self.step != PickerStep::Size {
            return false;
        }
        self.sizes = sizes;
        self.loading = false;
        true
    }

    /// Pick a size of the current set
    pub fn select_size(&mut self, size_id: u32) -> Option<SetSelection> {
        if self.step != PickerStep::Size || !self.sizes.iter().any(|s| s.id == size_id) {
            return None;
        }
        self.size_id = Some(size_id);
        self.selection()
    }

    /// Record a failed fetch; stale failures are ignored
    pub fn fetch_failed(&mut self, ticket: FetchTicket, message: &str) {
        if self.is_current(ticket) {
            self.loading = false;
            self.error = Some(message.to_string());
        }
    }

    /// Step back one level, dropping the data of the level being left
    pub fn back(&mut self) {
        match self.step {
            PickerStep::Size => {
                self.set_id = None;
                self.size_id = None;
                self.sizes.clear();
                self.step = PickerStep::Set;
            }
            PickerStep::Set => {
                self.brand_id = None;
                self.sets.clear();
                self.step = PickerStep::Brand;
            }
            PickerStep::Brand => return,
        }
        // Any response still in flight is for the level we just left
        self.generation += 1;
        self.loading = false;
        self.error = None;
    }

    /// Back to the brand list, keeping the loaded brands
    pub fn reset(&mut self) {
        let brands = std::mem::take(&mut self.brands);
        let generation = self.generation + 1;
        *self = Self::new();
        self.brands = brands;
        self.generation = generation;
    }

    fn begin_fetch(&mut self, id: u32) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        FetchTicket { generation: self.generation, id }
    }

    fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.generation == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BrandRef;

    fn brand(id: u32) -> Brand {
        Brand { id, name: format!("Brand {}", id) }
    }

    fn set(id: u32) -> PencilSet {
        PencilSet { id, name: format!("Set {}", id), brand: BrandRef::default(), count: 24, pencils: None }
    }

    fn size(id: u32, count: u32) -> PencilSetSize {
        PencilSetSize { id, name: None, count, colored_pencil_set_id: None }
    }

    #[test]
    fn test_full_walk_resolves_pair() {
        let mut picker = SetPicker::new();
        picker.brands_loaded(vec![brand(1), brand(2)]);

        let t = picker.select_brand(1);
        assert_eq!(picker.step(), PickerStep::Set);
        assert!(picker.is_loading());
        assert!(picker.sets_loaded(t, vec![set(10), set(11)]));

        let t = picker.select_set(11);
        assert!(picker.sizes_loaded(t, vec![size(100, 12), size(101, 24)]));
        assert_eq!(picker.selection(), None);

        let sel = picker.select_size(101);
        assert_eq!(sel, Some(SetSelection { set_id: 11, size_id: Some(101) }));
        assert_eq!(picker.brand_name(), Some("Brand 1"));
    }

    #[test]
    fn test_select_brand_resets_set_and_size() {
        let mut picker = SetPicker::new();
        let t = picker.select_brand(1);
        picker.sets_loaded(t, vec![set(10)]);
        let t = picker.select_set(10);
        picker.sizes_loaded(t, vec![size(100, 12)]);
        picker.select_size(100);

        picker.select_brand(2);
        assert_eq!(picker.brand_id(), Some(2));
        assert_eq!(picker.set_id(), None);
        assert_eq!(picker.size_id(), None);
        assert!(picker.sets().is_empty());
        assert!(picker.sizes().is_empty());
        assert_eq!(picker.selection(), None);
    }

    #[test]
    fn test_back_from_size_keeps_brands() {
        let mut picker = SetPicker::new();
        picker.brands_loaded(vec![brand(1)]);
        let t = picker.select_brand(1);
        picker.sets_loaded(t, vec![set(10)]);
        let t = picker.select_set(10);
        picker.sizes_loaded(t, vec![size(100, 12)]);

        picker.back();
        assert_eq!(picker.step(), PickerStep::Set);
        assert!(picker.sizes().is_empty());
        assert_eq!(picker.set_id(), None);
        assert_eq!(picker.sets().len(), 1);
        assert_eq!(picker.brands().len(), 1);

        picker.back();
        assert_eq!(picker.step(), PickerStep::Brand);
        assert!(picker.sets().is_empty());
        assert_eq!(picker.brands().len(), 1);

        picker.back();
        assert_eq!(picker.step(), PickerStep::Brand);
    }

    #[test]
    fn test_stale_sets_response_is_dropped() {
        let mut picker = SetPicker::new();
        let old = picker.select_brand(1);
        let new = picker.select_brand(2);
        assert!(!picker.sets_loaded(old, vec![set(10)]));
        assert!(picker.sets().is_empty());
        assert!(picker.is_loading());
        assert!(picker.sets_loaded(new, vec![set(20)]));
        assert_eq!(picker.sets()[0].id, 20);
    }

    #[test]
    fn test_response_after_back_is_dropped() {
        let mut picker = SetPicker::new();
        let t = picker.select_brand(1);
        picker.sets_loaded(t, vec![set(10)]);
        let t = picker.select_set(10);
        picker.back();
        assert!(!picker.sizes_loaded(t, vec![size(1, 12)]));
        assert!(picker.sizes().is_empty());
    }

    #[test]
    fn test_set_without_sizes_resolves() {
        let mut picker = SetPicker::new();
        let t = picker.select_brand(1);
        picker.sets_loaded(t, vec![set(10)]);
        let t = picker.select_set(10);
        assert_eq!(picker.selection(), None);
        picker.sizes_loaded(t, vec![]);
        assert_eq!(picker.selection(), Some(SetSelection { set_id: 10, size_id: None }));
    }

    #[test]
    fn test_unknown_size_is_rejected() {
        let mut picker = SetPicker::new();
        let t = picker.select_brand(1);
        picker.sets_loaded(t, vec![set(10)]);
        let t = picker.select_set(10);
        picker.sizes_loaded(t, vec![size(100, 12)]);
        assert_eq!(picker.select_size(999), None);
        assert_eq!(picker.size_id(), None);
    }

    #[test]
    fn test_fetch_failure_sets_error() {
        let mut picker = SetPicker::new();
        let stale = picker.select_brand(1);
        let t = picker.select_brand(2);
        picker.fetch_failed(stale, "ignored");
        assert_eq!(picker.error(), None);
        picker.fetch_failed(t, "Could not load sets");
        assert_eq!(picker.error(), Some("Could not load sets"));
        assert!(!picker.is_loading());
    }

    #[test]
    fn test_reset_keeps_brands() {
        let mut picker = SetPicker::new();
        picker.brands_loaded(vec![brand(1), brand(2)]);
        let t = picker.select_brand(1);
        picker.reset();
        assert_eq!(picker.step(), PickerStep::Brand);
        assert_eq!(picker.brands().len(), 2);
        assert!(!picker.sets_loaded(t, vec![set(1)]));
    }
}
