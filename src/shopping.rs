//! Shopping List
//!
//! Out-of-stock pencils across the user's sets, grouped for a store trip.

use std::cmp::Ordering;

use crate::models::{Pencil, PencilSet};

#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingGroup {
    pub set_id: u32,
    pub set_title: String,
    pub pencils: Vec<Pencil>,
}

/// Numeric color numbers sort numerically, others after them by text
fn compare_numbers(a: &Option<String>, b: &Option<String>) -> Ordering {
    let parse = |s: &Option<String>| s.as_deref().and_then(|n| n.trim().parse::<u32>().ok());
    match (parse(a), parse(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Groups of out-of-stock pencils, one per set that has any, in set-title order
pub fn build(sets: &[PencilSet]) -> Vec<ShoppingGroup> {
    let mut groups: Vec<ShoppingGroup> = sets
        .iter()
        .filter_map(|set| {
            let mut pencils: Vec<Pencil> = set.pencils().iter().filter(|p| p.is_out_of_stock()).cloned().collect();
            if pencils.is_empty() {
                return None;
            }
            pencils.sort_by(|a, b| {
                compare_numbers(&a.color_number, &b.color_number).then_with(|| a.color_name.cmp(&b.color_name))
            });
            Some(ShoppingGroup { set_id: set.id, set_title: set.title(), pencils })
        })
        .collect();
    groups.sort_by(|a, b| a.set_title.cmp(&b.set_title));
    groups
}

pub fn total(groups: &[ShoppingGroup]) -> usize {
    groups.iter().map(|g| g.pencils.len()).sum()
}

/// Plain text for the clipboard
pub fn to_text(groups: &[ShoppingGroup]) -> String {
    let mut out = String::new();
    for group in groups {
        out.push_str(&group.set_title);
        out.push('\n');
        for pencil in &group.pencils {
            out.push_str("- ");
            out.push_str(&pencil.label());
            out.push('\n');
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BrandRef, Color};

    fn pencil(id: u32, number: Option<&str>, name: &str, inventory: Option<i32>) -> Pencil {
        Pencil {
            id,
            color_name: name.to_string(),
            color_number: number.map(str::to_string),
            color: Color { id, name: None, hex: "#123456".to_string() },
            inventory,
        }
    }

    fn set(id: u32, brand: &str, name: &str, pencils: Vec<Pencil>) -> PencilSet {
        PencilSet { id, name: name.to_string(), brand: BrandRef::Name(brand.to_string()), count: pencils.len() as u32, pencils: Some(pencils) }
    }

    #[test]
    fn test_only_out_of_stock_grouped_and_sorted() {
        let sets = vec![
            set(2, "Prismacolor", "Premier", vec![
                pencil(1, Some("PC1077"), "Colorless Blender", Some(0)),
                pencil(2, Some("PC924"), "Crimson Red", Some(3)),
            ]),
            set(1, "Faber-Castell", "Polychromos", vec![
                pencil(3, Some("199"), "Black", Some(0)),
                pencil(4, Some("101"), "White", Some(0)),
                pencil(5, None, "Unknown", None),
            ]),
            set(3, "Derwent", "Lightfast", vec![pencil(6, Some("1"), "Lemon", Some(2))]),
        ];

        let groups = build(&sets);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].set_title, "Faber-Castell Polychromos");
        let ids: Vec<u32> = groups[0].pencils.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![4, 3]);
        assert_eq!(groups[1].pencils.len(), 1);
        assert_eq!(total(&groups), 3);
    }

    #[test]
    fn test_numeric_before_text_numbers() {
        assert_eq!(compare_numbers(&Some("9".into()), &Some("10".into())), Ordering::Less);
        assert_eq!(compare_numbers(&Some("10".into()), &Some("A1".into())), Ordering::Less);
        assert_eq!(compare_numbers(&None, &Some("A1".into())), Ordering::Less);
    }

    #[test]
    fn test_to_text() {
        let sets = vec![set(1, "Faber-Castell", "Polychromos", vec![pencil(4, Some("101"), "White", Some(0))])];
        assert_eq!(to_text(&build(&sets)), "Faber-Castell Polychromos\n- 101 White");
        assert_eq!(to_text(&[]), "");
    }
}
