//! Color Math
//!
//! Hex parsing, Euclidean RGB distance and the Delta E display helpers.
//! Perceptual matching happens server-side; the RGB distance here only
//! backs up a failed comparison call.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("empty color string")]
    Empty,

    #[error("invalid hex length")]
    InvalidLength,

    #[error("invalid hex digits")]
    InvalidHex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Rec. 601 luma, 0..255
    pub fn luma(self) -> f64 {
        0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64
    }

    /// Black or white, whichever reads better on this background
    pub fn contrast_text(self) -> &'static str {
        if self.luma() > 150.0 { "#000000" } else { "#ffffff" }
    }

    pub fn distance(self, other: Rgb) -> f64 {
        let dr = self.r as f64 - other.r as f64;
        let dg = self.g as f64 - other.g as f64;
        let db = self.b as f64 - other.b as f64;
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

/// Parse `#rgb` / `#rrggbb`, `#` optional, any case
pub fn parse_hex(input: &str) -> Result<Rgb, ColorParseError> {
    let hex = input.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.is_empty() {
        return Err(ColorParseError::Empty);
    }

    let nibble = |c: u8| -> Result<u8, ColorParseError> {
        match c {
            b'0'..=b'9' => Ok(c - b'0'),
            b'a'..=b'f' => Ok(c - b'a' + 10),
            b'A'..=b'F' => Ok(c - b'A' + 10),
            _ => Err(ColorParseError::InvalidHex),
        }
    };

    let bytes = hex.as_bytes();
    match bytes.len() {
        3 => Ok(Rgb::new(
            nibble(bytes[0])? * 17,
            nibble(bytes[1])? * 17,
            nibble(bytes[2])? * 17,
        )),
        6 => {
            let pair = |i: usize| -> Result<u8, ColorParseError> { Ok(nibble(bytes[i])? << 4 | nibble(bytes[i + 1])?) };
            Ok(Rgb::new(pair(0)?, pair(2)?, pair(4)?))
        }
        _ => Err(ColorParseError::InvalidLength),
    }
}

/// Euclidean distance between two hex colors in RGB space
pub fn color_distance(hex_a: &str, hex_b: &str) -> Result<f64, ColorParseError> {
    Ok(parse_hex(hex_a)?.distance(parse_hex(hex_b)?))
}

/// Nearest candidate by RGB distance. Unparseable candidates are skipped;
/// ties keep the earlier candidate.
pub fn find_closest_color<'a, T, F>(hex: &str, candidates: &'a [T], hex_of: F) -> Option<(&'a T, f64)>
where
    F: Fn(&T) -> &str,
{
    let target = parse_hex(hex).ok()?;
    let mut best: Option<(&'a T, f64)> = None;
    for candidate in candidates {
        let Ok(rgb) = parse_hex(hex_of(candidate)) else {
            continue;
        };
        let dist = target.distance(rgb);
        if best.map_or(true, |(_, d)| dist < d) {
            best = Some((candidate, dist));
        }
    }
    best
}

/// Display percentage for a Delta E: `100 - ΔE`, clamped to 0..=100
pub fn delta_e_to_percentage(delta_e: f64) -> String {
    let pct = if delta_e.is_nan() { 0.0 } else { (100.0 - delta_e).clamp(0.0, 100.0) };
    format!("{:.1}", pct)
}

/// Display band for a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchQuality {
    Excellent,
    Good,
    Fair,
    Poor,
    Unknown,
}

impl MatchQuality {
    /// Server labels (case-insensitive); anything else is Unknown
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "excellent" | "perfect" => MatchQuality::Excellent,
            "good" | "very good" => MatchQuality::Good,
            "fair" | "acceptable" => MatchQuality::Fair,
            "poor" | "bad" => MatchQuality::Poor,
            _ => MatchQuality::Unknown,
        }
    }

    /// Band for a client-side RGB distance (0..~441)
    pub fn for_rgb_distance(distance: f64) -> Self {
        match distance {
            d if d < 20.0 => MatchQuality::Excellent,
            d if d < 50.0 => MatchQuality::Good,
            d if d < 100.0 => MatchQuality::Fair,
            _ => MatchQuality::Poor,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MatchQuality::Excellent => "excellent",
            MatchQuality::Good => "good",
            MatchQuality::Fair => "fair",
            MatchQuality::Poor => "poor",
            MatchQuality::Unknown => "unknown",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            MatchQuality::Excellent => "match-quality excellent",
            MatchQuality::Good => "match-quality good",
            MatchQuality::Fair => "match-quality fair",
            MatchQuality::Poor => "match-quality poor",
            MatchQuality::Unknown => "match-quality",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(parse_hex("#ffffff"), Ok(Rgb::new(255, 255, 255)));
        assert_eq!(parse_hex("C8102E"), Ok(Rgb::new(200, 16, 46)));
        assert_eq!(parse_hex("#0f8"), Ok(Rgb::new(0, 255, 136)));
        assert_eq!(parse_hex(""), Err(ColorParseError::Empty));
        assert_eq!(parse_hex("#"), Err(ColorParseError::Empty));
        assert_eq!(parse_hex("#12345"), Err(ColorParseError::InvalidLength));
        assert_eq!(parse_hex("#zzzzzz"), Err(ColorParseError::InvalidHex));
    }

    #[test]
    fn test_parse_error_messages() {
        assert_eq!(ColorParseError::InvalidLength.to_string(), "invalid hex length");
        let err: Box<dyn std::error::Error> = Box::new(ColorParseError::InvalidHex);
        assert_eq!(err.to_string(), "invalid hex digits");
    }

    #[test]
    fn test_black_white_distance() {
        let d = color_distance("#000000", "#ffffff").unwrap();
        assert!((d - (3.0f64 * 255.0 * 255.0).sqrt()).abs() < 1e-9);
        assert!((d - 441.67).abs() < 0.01);
    }

    #[test]
    fn test_self_distance_is_zero() {
        for hex in ["#000000", "#c8102e", "#0f8", "ABCDEF"] {
            assert_eq!(color_distance(hex, hex).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_distance_rejects_bad_hex() {
        assert!(color_distance("#000000", "nope").is_err());
    }

    #[test]
    fn test_find_closest_color() {
        let candidates = vec!["#ff0000", "bad", "#00ff00", "#fe0101"];
        let (best, dist) = find_closest_color("#fe0202", &candidates, |c| *c).unwrap();
        assert_eq!(*best, "#fe0101");
        assert!(dist < 2.0);
    }

    #[test]
    fn test_find_closest_tie_keeps_first() {
        let candidates = vec!["#000002", "#020000"];
        let (best, _) = find_closest_color("#000000", &candidates, |c| *c).unwrap();
        assert_eq!(*best, "#000002");
    }

    #[test]
    fn test_find_closest_empty() {
        let candidates: Vec<&str> = vec![];
        assert!(find_closest_color("#000000", &candidates, |c| *c).is_none());
        assert!(find_closest_color("garbage", &["#000000"], |c| *c).is_none());
    }

    #[test]
    fn test_delta_e_to_percentage() {
        assert_eq!(delta_e_to_percentage(0.0), "100.0");
        assert_eq!(delta_e_to_percentage(100.0), "0.0");
        assert_eq!(delta_e_to_percentage(50.0), "50.0");
        assert_eq!(delta_e_to_percentage(2.34), "97.7");
    }

    #[test]
    fn test_delta_e_out_of_range_is_clamped() {
        assert_eq!(delta_e_to_percentage(150.0), "0.0");
        assert_eq!(delta_e_to_percentage(-5.0), "100.0");
        assert_eq!(delta_e_to_percentage(f64::NAN), "0.0");
    }

    #[test]
    fn test_match_quality() {
        assert_eq!(MatchQuality::parse("Excellent"), MatchQuality::Excellent);
        assert_eq!(MatchQuality::parse(" fair "), MatchQuality::Fair);
        assert_eq!(MatchQuality::parse("???"), MatchQuality::Unknown);
        assert_eq!(MatchQuality::for_rgb_distance(0.0), MatchQuality::Excellent);
        assert_eq!(MatchQuality::for_rgb_distance(441.0), MatchQuality::Poor);
    }

    #[test]
    fn test_contrast_text() {
        assert_eq!(Rgb::new(255, 255, 255).contrast_text(), "#000000");
        assert_eq!(Rgb::new(10, 10, 60).contrast_text(), "#ffffff");
        assert_eq!(Rgb::new(200, 16, 46).to_hex(), "#c8102e");
    }
}
