//! Stable per-place accent colors.
//!
//! A place always renders with the same gradient: the name is hashed with the
//! classic `hash * 31 + c` string hash over UTF-16 code units, in 32-bit signed
//! arithmetic with wraparound, and the hash picks a palette entry.

use serde::Serialize;

/// Two-stop gradient, start and end colors as CSS hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Gradient {
    pub from: &'static str,
    pub to: &'static str,
}

impl Gradient {
    #[must_use]
    pub const fn new(from: &'static str, to: &'static str) -> Self {
        Self { from, to }
    }

    /// CSS background value for a suggestion card.
    #[must_use]
    pub fn css(&self) -> String {
        format!("linear-gradient(135deg, {} 0%, {} 100%)", self.from, self.to)
    }
}

impl std::fmt::Display for Gradient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", self.from, self.to)
    }
}

/// Default palette. Reordering it reassigns every place's accent.
pub const PALETTE: [Gradient; 10] = [
    Gradient::new("#FF6B6B", "#FFE66D"), // red to yellow
    Gradient::new("#4ECDC4", "#44A08D"), // teal to green
    Gradient::new("#F093FB", "#F5576C"), // pink to red
    Gradient::new("#4facfe", "#00f2fe"), // blue to cyan
    Gradient::new("#43e97b", "#38f9d7"), // green to turquoise
    Gradient::new("#fa709a", "#fee140"), // pink to yellow
    Gradient::new("#30cfd0", "#330867"), // cyan to purple
    Gradient::new("#a8edea", "#fed6e3"), // mint to pink
    Gradient::new("#ff9a56", "#ff6a88"), // orange to pink
    Gradient::new("#ffecd2", "#fcb69f"), // cream to peach
];

/// 32-bit string hash: `hash = c + ((hash << 5) - hash)` per UTF-16 unit.
#[must_use]
pub fn name_hash(name: &str) -> i32 {
    name.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    })
}

/// Palette entry for `name`.
///
/// # Panics
///
/// Panics if `palette` is empty.
#[must_use]
pub fn derive_accent<T: Copy>(name: &str, palette: &[T]) -> T {
    assert!(!palette.is_empty(), "accent palette must not be empty");
    let hash = name_hash(name).unsigned_abs();
    #[allow(clippy::cast_possible_truncation)]
    let index = hash as usize % palette.len();
    palette[index]
}

/// Accent from the default [`PALETTE`].
#[must_use]
pub fn accent_for(name: &str) -> Gradient {
    derive_accent(name, &PALETTE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_matches_reference_values() {
        assert_eq!(name_hash(""), 0);
        assert_eq!(name_hash("A"), 65);
        assert_eq!(name_hash("Joe's Pizza"), 1_189_214_228);
        assert_eq!(name_hash("Thai Garden"), -39_465_671);
        assert_eq!(name_hash("Sushi Go"), -1_520_322_314);
    }

    #[test]
    fn hash_uses_utf16_code_units() {
        // The noodle emoji is a surrogate pair, hashed as two units.
        assert_eq!(name_hash("Café 🍜"), -2_081_790_753);
    }

    #[test]
    fn accent_index_reference_values() {
        assert_eq!(accent_for("A"), PALETTE[5]);
        assert_eq!(accent_for("Joe's Pizza"), PALETTE[8]);
        assert_eq!(accent_for("Thai Garden"), PALETTE[1]);
        assert_eq!(accent_for("Sushi Go"), PALETTE[4]);
        assert_eq!(accent_for(""), PALETTE[0]);
    }

    #[test]
    fn accent_is_stable_across_calls() {
        let first = accent_for("Dumpling House");
        for _ in 0..10 {
            assert_eq!(accent_for("Dumpling House"), first);
        }
    }

    #[test]
    fn custom_palette() {
        let palette = ["red", "blue", "green"];
        // 65 % 3 == 2
        assert_eq!(derive_accent("A", &palette), "green");
    }

    #[test]
    fn css_rendering() {
        assert_eq!(
            PALETTE[0].css(),
            "linear-gradient(135deg, #FF6B6B 0%, #FFE66D 100%)"
        );
    }
}
