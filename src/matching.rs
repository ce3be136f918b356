//! Match Assembly
//!
//! Turns comparison responses into per-pencil rows, and produces the RGB
//! fallback when the comparison endpoint fails.

use std::collections::HashMap;

use crate::color::{self, MatchQuality};
use crate::models::{Match, Pencil};

/// Largest possible RGB distance (black to white)
const MAX_RGB_DISTANCE: f64 = 441.672_955_930_063_7;

/// Where a set of matches came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSource {
    /// Delta E from the comparison endpoint
    Server,
    /// Client-side RGB approximation
    Fallback,
}

/// Matches of one source set against one target set
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub target_set_id: u32,
    pub source: MatchSource,
    pub matches: Vec<Match>,
}

impl Comparison {
    /// Percentage text for a match, using the scale its source implies
    pub fn percentage(&self, m: &Match) -> String {
        self.score(m.delta_e)
    }

    /// Percentage text for a raw distance, e.g. a column average
    pub fn score(&self, distance: f64) -> String {
        match self.source {
            MatchSource::Server => color::delta_e_to_percentage(distance),
            MatchSource::Fallback => rgb_similarity_percentage(distance),
        }
    }
}

/// `100 * (1 - d / max)`, for fallback matches where `delta_e` holds an RGB distance
pub fn rgb_similarity_percentage(distance: f64) -> String {
    let pct = (1.0 - distance / MAX_RGB_DISTANCE) * 100.0;
    format!("{:.1}", pct.clamp(0.0, 100.0))
}

/// Closest target pencil for every source pencil, by RGB distance.
/// Source pencils with an unparseable hex are left out.
pub fn fallback_matches(source: &[Pencil], target: &[Pencil]) -> Vec<Match> {
    source
        .iter()
        .filter_map(|src| {
            let (best, distance) = color::find_closest_color(src.hex(), target, |p| p.hex())?;
            Some(Match {
                source_pencil: src.clone(),
                target_pencil: Some(best.clone()),
                target_pencil_mix: None,
                delta_e: distance,
                match_quality: MatchQuality::for_rgb_distance(distance).label().to_string(),
                is_mix: false,
            })
        })
        .collect()
}

/// One source pencil and its best match in each target column
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub source: Pencil,
    pub cells: Vec<Option<Match>>,
}

/// Conversion grid: rows follow `source_pencils` order, columns follow `comparisons`
pub fn build_grid(source_pencils: &[Pencil], comparisons: &[Comparison]) -> Vec<GridRow> {
    let best_per_column: Vec<HashMap<u32, &Match>> = comparisons
        .iter()
        .map(|c| {
            let mut best: HashMap<u32, &Match> = HashMap::new();
            for m in &c.matches {
                best.entry(m.source_pencil.id)
                    .and_modify(|cur| {
                        if m.delta_e < cur.delta_e {
                            *cur = m;
                        }
                    })
                    .or_insert(m);
            }
            best
        })
        .collect();

    source_pencils
        .iter()
        .map(|pencil| GridRow {
            source: pencil.clone(),
            cells: best_per_column
                .iter()
                .map(|col| col.get(&pencil.id).map(|m| (*m).clone()))
                .collect(),
        })
        .collect()
}

/// Average Delta E per column, ignoring empty cells
pub fn column_average(rows: &[GridRow], column: usize) -> Option<f64> {
    let values: Vec<f64> = rows
        .iter()
        .filter_map(|r| r.cells.get(column).and_then(|c| c.as_ref()).map(|m| m.delta_e))
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Color;

    fn pencil(id: u32, hex: &str) -> Pencil {
        Pencil {
            id,
            color_name: format!("Pencil {}", id),
            color_number: None,
            color: Color { id, name: None, hex: hex.to_string() },
            inventory: None,
        }
    }

    fn server_match(src: &Pencil, target: &Pencil, delta_e: f64) -> Match {
        Match {
            source_pencil: src.clone(),
            target_pencil: Some(target.clone()),
            target_pencil_mix: None,
            delta_e,
            match_quality: "good".to_string(),
            is_mix: false,
        }
    }

    #[test]
    fn test_fallback_picks_nearest() {
        let source = vec![pencil(1, "#ff0000"), pencil(2, "#0000fe")];
        let target = vec![pencil(10, "#00ff00"), pencil(11, "#0000ff"), pencil(12, "#fa0000")];
        let matches = fallback_matches(&source, &target);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].target_pencil.as_ref().unwrap().id, 12);
        assert_eq!(matches[1].target_pencil.as_ref().unwrap().id, 11);
        assert_eq!(matches[1].delta_e, 1.0);
        assert_eq!(matches[1].match_quality, "excellent");
        assert!(!matches[0].is_mix);
    }

    #[test]
    fn test_fallback_skips_bad_source_and_empty_target() {
        let source = vec![pencil(1, "not-a-color")];
        assert!(fallback_matches(&source, &[pencil(2, "#000000")]).is_empty());
        assert!(fallback_matches(&[pencil(3, "#000000")], &[]).is_empty());
    }

    #[test]
    fn test_rgb_similarity_percentage() {
        assert_eq!(rgb_similarity_percentage(0.0), "100.0");
        assert_eq!(rgb_similarity_percentage(MAX_RGB_DISTANCE), "0.0");
        assert_eq!(rgb_similarity_percentage(1000.0), "0.0");
    }

    #[test]
    fn test_percentage_by_source() {
        let m = server_match(&pencil(1, "#000000"), &pencil(2, "#000000"), 10.0);
        let server = Comparison { target_set_id: 1, source: MatchSource::Server, matches: vec![] };
        let fallback = Comparison { target_set_id: 1, source: MatchSource::Fallback, matches: vec![] };
        assert_eq!(server.percentage(&m), "90.0");
        assert_eq!(fallback.percentage(&m), "97.7");
    }

    #[test]
    fn test_grid_keeps_best_per_cell() {
        let a = pencil(1, "#111111");
        let b = pencil(2, "#222222");
        let t1 = pencil(10, "#111112");
        let t2 = pencil(11, "#111113");
        let col0 = Comparison {
            target_set_id: 7,
            source: MatchSource::Server,
            matches: vec![server_match(&a, &t1, 3.0), server_match(&a, &t2, 1.5)],
        };
        let col1 = Comparison {
            target_set_id: 8,
            source: MatchSource::Server,
            matches: vec![server_match(&b, &t1, 2.0)],
        };

        let rows = build_grid(&[a.clone(), b.clone()], &[col0, col1]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cells[0].as_ref().unwrap().target_pencil.as_ref().unwrap().id, 11);
        assert!(rows[0].cells[1].is_none());
        assert!(rows[1].cells[0].is_none());
        assert_eq!(rows[1].cells[1].as_ref().unwrap().delta_e, 2.0);

        assert_eq!(column_average(&rows, 0), Some(1.5));
        assert_eq!(column_average(&rows, 1), Some(2.0));
        assert_eq!(column_average(&rows, 5), None);
    }
}
