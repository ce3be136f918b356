//! Frontend Models
//!
//! Shapes of the JSON records served by the pencil API.

use serde::{Deserialize, Deserializer, Serialize};

/// A single RGB swatch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
    pub hex: String,
}

/// A color as it appears in one specific set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pencil {
    pub id: u32,
    pub color_name: String,
    #[serde(default, deserialize_with = "de_opt_string_or_number")]
    pub color_number: Option<String>,
    pub color: Color,
    #[serde(default)]
    pub inventory: Option<i32>,
}

impl Pencil {
    /// "101 White" or just "White"
    pub fn label(&self) -> String {
        match &self.color_number {
            Some(num) if !num.is_empty() => format!("{} {}", num, self.color_name),
            _ => self.color_name.clone(),
        }
    }

    pub fn hex(&self) -> &str {
        &self.color.hex
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.inventory == Some(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: u32,
    pub name: String,
}

/// Sets arrive with the brand either inlined as a name or as a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BrandRef {
    Record(Brand),
    Name(String),
}

impl Default for BrandRef {
    fn default() -> Self {
        BrandRef::Name(String::new())
    }
}

impl BrandRef {
    pub fn name(&self) -> &str {
        match self {
            BrandRef::Record(b) => &b.name,
            BrandRef::Name(n) => n,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PencilSet {
    pub id: u32,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub brand: BrandRef,
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u32,
    #[serde(default)]
    pub pencils: Option<Vec<Pencil>>,
}

impl PencilSet {
    pub fn title(&self) -> String {
        let brand = self.brand.name();
        if brand.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", brand, self.name)
        }
    }

    pub fn pencils(&self) -> &[Pencil] {
        self.pencils.as_deref().unwrap_or(&[])
    }
}

/// A sellable piece-count variant of a set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PencilSetSize {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
    pub count: u32,
    #[serde(default)]
    pub colored_pencil_set_id: Option<u32>,
}

impl PencilSetSize {
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => format!("{} ({} colors)", name, self.count),
            _ => format!("{} colors", self.count),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorCombo {
    pub id: u32,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pencils: Vec<Pencil>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorPalette {
    pub id: u32,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub colors: Vec<Color>,
    #[serde(default)]
    pub base_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InspirationKind {
    Video,
    File,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inspiration {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: InspirationKind,
    pub title: String,
    #[serde(default)]
    pub embed_id: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: u32,
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    #[serde(default)]
    pub inspiration_id: Option<u32>,
    #[serde(default)]
    pub book_id: Option<u32>,
    #[serde(default)]
    pub colored_pencil_set_id: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pencils: Vec<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub palettes: Vec<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub combos: Vec<u32>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Two target pencils blended to approximate one source color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PencilMix {
    pub pencil_a: Pencil,
    pub pencil_b: Pencil,
    /// Share of `pencil_a`, 0..1
    #[serde(default)]
    pub ratio: Option<f64>,
}

/// One row of a comparison result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub source_pencil: Pencil,
    #[serde(default)]
    pub target_pencil: Option<Pencil>,
    #[serde(default)]
    pub target_pencil_mix: Option<PencilMix>,
    pub delta_e: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub match_quality: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_mix: bool,
}

impl Match {
    /// Pencils on the target side (one, or two for a mix)
    pub fn target_pencils(&self) -> Vec<&Pencil> {
        match (&self.target_pencil, &self.target_pencil_mix) {
            (_, Some(mix)) if self.is_mix => vec![&mix.pencil_a, &mix.pencil_b],
            (Some(p), _) => vec![p],
            (None, Some(mix)) => vec![&mix.pencil_a, &mix.pencil_b],
            (None, None) => vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub matches: Vec<Match>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// List responses are either paginated or a bare array
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Page<T> {
    Paged {
        data: Vec<T>,
        current_page: u32,
        last_page: u32,
    },
    Wrapped {
        data: Vec<T>,
    },
    Bare(Vec<T>),
}

impl<T> Page<T> {
    /// Last page number, if the response is paginated
    pub fn last_page(&self) -> Option<u32> {
        match self {
            Page::Paged { last_page, .. } => Some(*last_page),
            _ => None,
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            Page::Paged { data, .. } | Page::Wrapped { data } | Page::Bare(data) => data,
        }
    }
}

/// `null` decodes like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn de_opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_paged_list() {
        let json = r#"{"data":[{"id":1,"name":"Prismacolor"}],"current_page":1,"last_page":3}"#;
        let page: Page<Brand> = serde_json::from_str(json).unwrap();
        assert_eq!(page.last_page(), Some(3));
        assert_eq!(page.into_items().len(), 1);
    }

    #[test]
    fn test_decode_bare_list() {
        let json = r#"[{"id":1,"name":"Faber-Castell"},{"id":2,"name":"Caran d'Ache"}]"#;
        let page: Page<Brand> = serde_json::from_str(json).unwrap();
        assert_eq!(page.last_page(), None);
        assert_eq!(page.into_items()[1].name, "Caran d'Ache");
    }

    #[test]
    fn test_decode_wrapped_list() {
        let json = r#"{"data":[{"id":9,"name":"Holbein"}]}"#;
        let page: Page<Brand> = serde_json::from_str(json).unwrap();
        assert_eq!(page.last_page(), None);
        assert_eq!(page.into_items()[0].id, 9);
    }

    #[test]
    fn test_pencil_number_accepts_int() {
        let json = r##"{"id":5,"color_name":"Crimson Red","color_number":924,"color":{"id":2,"hex":"#c8102e"}}"##;
        let pencil: Pencil = serde_json::from_str(json).unwrap();
        assert_eq!(pencil.color_number.as_deref(), Some("924"));
        assert_eq!(pencil.label(), "924 Crimson Red");
        assert_eq!(pencil.inventory, None);
    }

    #[test]
    fn test_set_brand_as_name_or_record() {
        let a: PencilSet = serde_json::from_str(r#"{"id":1,"name":"Polychromos","brand":"Faber-Castell","count":120}"#).unwrap();
        let b: PencilSet = serde_json::from_str(r#"{"id":1,"name":"Polychromos","brand":{"id":4,"name":"Faber-Castell"},"count":120}"#).unwrap();
        assert_eq!(a.brand.name(), "Faber-Castell");
        assert_eq!(b.brand.name(), "Faber-Castell");
        assert_eq!(a.title(), "Faber-Castell Polychromos");
        assert!(a.pencils().is_empty());
    }

    #[test]
    fn test_decode_mix_match() {
        let json = r##"{
            "source_pencil": {"id":1,"color_name":"Teal","color":{"id":1,"hex":"#008080"}},
            "target_pencil_mix": {
                "pencil_a": {"id":2,"color_name":"Blue","color":{"id":2,"hex":"#0000ff"}},
                "pencil_b": {"id":3,"color_name":"Green","color":{"id":3,"hex":"#00ff00"}},
                "ratio": 0.6
            },
            "delta_e": 4.2,
            "match_quality": "good",
            "is_mix": true
        }"##;
        let m: Match = serde_json::from_str(json).unwrap();
        assert!(m.target_pencil.is_none());
        let ids: Vec<u32> = m.target_pencils().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_inspiration_kind() {
        let insp: Inspiration = serde_json::from_str(r#"{"id":1,"type":"video","title":"Roses","embed_id":"dQw4w9WgXcQ"}"#).unwrap();
        assert_eq!(insp.kind, InspirationKind::Video);
        assert!(insp.path.is_none());
    }

    #[test]
    fn test_null_lists_decode_empty() {
        let entry: JournalEntry = serde_json::from_str(
            r#"{"id":1,"date":"2024-05-01","pencils":null,"palettes":null,"combos":[3],"notes":null}"#,
        )
        .unwrap();
        assert!(entry.pencils.is_empty());
        assert!(entry.palettes.is_empty());
        assert_eq!(entry.combos, vec![3]);

        let palette: ColorPalette = serde_json::from_str(r#"{"id":2,"title":"Spring","colors":null}"#).unwrap();
        assert!(palette.colors.is_empty());
    }

    #[test]
    fn test_bare_list_with_null_pencils() {
        let json = r#"[{"id":1,"title":"Warm","pencils":[]},{"id":2,"title":"Cool","pencils":null}]"#;
        let page: Page<ColorCombo> = serde_json::from_str(json).unwrap();
        let combos = page.into_items();
        assert_eq!(combos.len(), 2);
        assert!(combos[1].pencils.is_empty());
    }

    #[test]
    fn test_match_with_null_quality() {
        let json = r##"{
            "source_pencil": {"id":1,"color_name":"Teal","color":{"id":1,"hex":"#008080"}},
            "target_pencil": {"id":2,"color_name":"Blue","color":{"id":2,"hex":"#0000ff"}},
            "delta_e": 12.5,
            "match_quality": null,
            "is_mix": null
        }"##;
        let m: Match = serde_json::from_str(json).unwrap();
        assert_eq!(m.match_quality, "");
        assert!(!m.is_mix);

        let response: CompareResponse = serde_json::from_str(r#"{"matches":null}"#).unwrap();
        assert!(response.matches.is_empty());
    }

    #[test]
    fn test_set_with_null_brand_and_count() {
        let set: PencilSet = serde_json::from_str(r#"{"id":1,"name":"Custom","brand":null,"count":null,"pencils":null}"#).unwrap();
        assert_eq!(set.count, 0);
        assert!(set.pencils().is_empty());
    }
}
