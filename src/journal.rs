//! Journal Helpers
//!
//! Client-side joins used by the colorist log form.

use std::collections::HashSet;

use crate::models::{ColorCombo, JournalEntry};

/// Combos sharing at least one pencil with the chosen set or the
/// individually picked pencils. With nothing chosen, every combo qualifies.
pub fn filter_combos(combos: &[ColorCombo], set_pencil_ids: &[u32], selected_pencil_ids: &[u32]) -> Vec<ColorCombo> {
    let wanted: HashSet<u32> = set_pencil_ids.iter().chain(selected_pencil_ids).copied().collect();
    if wanted.is_empty() {
        return combos.to_vec();
    }
    combos
        .iter()
        .filter(|combo| combo.pencils.iter().any(|p| wanted.contains(&p.id)))
        .cloned()
        .collect()
}

/// Entries of one day, newest id first
pub fn entries_on(entries: &[JournalEntry], iso_date: &str) -> Vec<JournalEntry> {
    let mut day: Vec<JournalEntry> = entries
        .iter()
        .filter(|e| e.date.get(..10) == Some(iso_date))
        .cloned()
        .collect();
    day.sort_by(|a, b| b.id.cmp(&a.id));
    day
}

/// One-line summary for the entry list
pub fn summarize(entry: &JournalEntry) -> String {
    let mut parts = Vec::new();
    if !entry.pencils.is_empty() {
        parts.push(plural(entry.pencils.len(), "pencil"));
    }
    if !entry.palettes.is_empty() {
        parts.push(plural(entry.palettes.len(), "palette"));
    }
    if !entry.combos.is_empty() {
        parts.push(plural(entry.combos.len(), "combo"));
    }
    if parts.is_empty() {
        "Notes only".to_string()
    } else {
        parts.join(", ")
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 { format!("1 {}", word) } else { format!("{} {}s", n, word) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Color, Pencil};

    fn pencil(id: u32) -> Pencil {
        Pencil {
            id,
            color_name: format!("P{}", id),
            color_number: None,
            color: Color { id, name: None, hex: "#000000".to_string() },
            inventory: None,
        }
    }

    fn combo(id: u32, pencils: &[u32]) -> ColorCombo {
        ColorCombo { id, title: format!("Combo {}", id), pencils: pencils.iter().map(|&p| pencil(p)).collect() }
    }

    fn entry(id: u32, date: &str) -> JournalEntry {
        JournalEntry {
            id,
            date: date.to_string(),
            inspiration_id: None,
            book_id: None,
            colored_pencil_set_id: None,
            pencils: vec![],
            palettes: vec![],
            combos: vec![],
            notes: None,
        }
    }

    #[test]
    fn test_filter_combos_by_set_or_pencils() {
        let combos = vec![combo(1, &[1, 2]), combo(2, &[3]), combo(3, &[4, 5])];

        let by_set: Vec<u32> = filter_combos(&combos, &[2, 9], &[]).iter().map(|c| c.id).collect();
        assert_eq!(by_set, vec![1]);

        let by_pencil: Vec<u32> = filter_combos(&combos, &[], &[5]).iter().map(|c| c.id).collect();
        assert_eq!(by_pencil, vec![3]);

        let union: Vec<u32> = filter_combos(&combos, &[1], &[3]).iter().map(|c| c.id).collect();
        assert_eq!(union, vec![1, 2]);
    }

    #[test]
    fn test_filter_combos_without_selection_returns_all() {
        let combos = vec![combo(1, &[1]), combo(2, &[])];
        assert_eq!(filter_combos(&combos, &[], &[]).len(), 2);
    }

    #[test]
    fn test_entries_on_day() {
        let entries = vec![entry(1, "2024-05-01"), entry(2, "2024-05-02"), entry(3, "2024-05-01T12:00:00Z")];
        let ids: Vec<u32> = entries_on(&entries, "2024-05-01").iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_summarize() {
        let mut e = entry(1, "2024-05-01");
        assert_eq!(summarize(&e), "Notes only");
        e.pencils = vec![1, 2];
        e.combos = vec![7];
        assert_eq!(summarize(&e), "2 pencils, 1 combo");
    }
}
