// SPDX-License-Identifier: MIT OR Apache-2.0
//! Curve id normalization and the ordered curve menu.

use crate::curve::CurveMode;

/// Legacy and long-form names accepted in stored node data.
const ALIASES: &[(&str, CurveMode)] = &[
    ("step", CurveMode::None),
    ("hold", CurveMode::None),
    ("constant", CurveMode::None),
    ("stepped", CurveMode::None),
    ("lerp", CurveMode::Linear),
    ("smoothstep", CurveMode::Smooth),
    ("auto", CurveMode::Smooth),
    ("ease", CurveMode::CubicInOut),
    ("ease-in", CurveMode::CubicIn),
    ("ease-out", CurveMode::CubicOut),
    ("ease-in-out", CurveMode::CubicInOut),
    ("quadratic-in", CurveMode::QuadIn),
    ("quadratic-out", CurveMode::QuadOut),
    ("quadratic-in-out", CurveMode::QuadInOut),
    ("quartic-in", CurveMode::QuartIn),
    ("quartic-out", CurveMode::QuartOut),
    ("quartic-in-out", CurveMode::QuartInOut),
    ("quintic-in", CurveMode::QuintIn),
    ("quintic-out", CurveMode::QuintOut),
    ("quintic-in-out", CurveMode::QuintInOut),
    ("sinusoidal-in", CurveMode::SineIn),
    ("sinusoidal-out", CurveMode::SineOut),
    ("sinusoidal-in-out", CurveMode::SineInOut),
    ("circular-in", CurveMode::CircIn),
    ("circular-out", CurveMode::CircOut),
    ("circular-in-out", CurveMode::CircInOut),
    ("exponential-in", CurveMode::ExpoIn),
    ("exponential-out", CurveMode::ExpoOut),
    ("exponential-in-out", CurveMode::ExpoInOut),
];

/// Canonicalize a stored or user-typed curve id.
///
/// Lowercases and trims, then tries canonical ids, then aliases. Anything else,
/// including the empty string, becomes [`CurveMode::Linear`].
pub fn normalize(raw: &str) -> CurveMode {
    let key = raw.trim().to_ascii_lowercase();
    if key.is_empty() {
        return CurveMode::Linear;
    }

    if let Some(mode) = CurveMode::from_id(&key) {
        return mode;
    }

    ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, mode)| *mode)
        .unwrap_or_else(|| {
            tracing::trace!(raw, "unknown curve id, using linear");
            CurveMode::Linear
        })
}

/// Same as [`normalize`] for optional input; `None` becomes linear.
pub fn normalize_opt(raw: Option<&str>) -> CurveMode {
    raw.map_or(CurveMode::Linear, normalize)
}

/// Display string for a curve id or alias
pub fn label(raw: &str) -> &'static str {
    normalize(raw).label()
}

/// Entry in the curve picker menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogEntry {
    /// Selectable curve
    Curve(CurveMode),
    /// Visual divider between groups
    Separator,
}

impl CatalogEntry {
    /// Curve for this entry, if it is selectable
    pub fn curve(&self) -> Option<CurveMode> {
        match self {
            Self::Curve(mode) => Some(*mode),
            Self::Separator => None,
        }
    }
}

/// Ordered menu: singletons, then one group per family, groups split by separators.
pub fn catalog() -> Vec<CatalogEntry> {
    let mut entries = Vec::with_capacity(CurveMode::ALL.len() + 11);
    let all: &[CurveMode] = &CurveMode::ALL;
    let (singletons, families) = all.split_at(3);

    entries.extend(singletons.iter().copied().map(CatalogEntry::Curve));
    for family in families.chunks(3) {
        entries.push(CatalogEntry::Separator);
        entries.extend(family.iter().copied().map(CatalogEntry::Curve));
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_aliases() {
        assert_eq!(normalize("STEP"), CurveMode::None);
        assert_eq!(normalize("  Ease-In "), CurveMode::CubicIn);
        assert_eq!(normalize("ease-in-out"), CurveMode::CubicInOut);
        assert_eq!(normalize("exponential-out"), CurveMode::ExpoOut);
    }

    #[test]
    fn test_normalize_fallback() {
        assert_eq!(normalize("bogus"), CurveMode::Linear);
        assert_eq!(normalize(""), CurveMode::Linear);
        assert_eq!(normalize("   "), CurveMode::Linear);
        assert_eq!(normalize_opt(None), CurveMode::Linear);
        assert_eq!(normalize_opt(Some("hold")), CurveMode::None);
    }

    #[test]
    fn test_normalize_is_idempotent_on_canonical_ids() {
        assert_eq!(normalize("cubic-in"), CurveMode::CubicIn);
        for mode in CurveMode::ALL {
            assert_eq!(normalize(mode.id()), mode);
        }
    }

    #[test]
    fn test_aliases_do_not_shadow_canonical_ids() {
        for (alias, _) in ALIASES {
            assert!(CurveMode::from_id(alias).is_none(), "{alias} is canonical");
        }
    }

    #[test]
    fn test_label_always_defined() {
        for raw in ["", "bogus", "STEP", "\u{1F3B5}", "quad-in", "linear "] {
            assert!(!label(raw).is_empty());
        }
        assert_eq!(label("bogus"), "Linear");
        assert_eq!(label("step"), "None (Step)");
    }

    #[test]
    fn test_catalog_layout() {
        let entries = catalog();
        assert_eq!(entries.len(), 43);
        assert_eq!(entries[0], CatalogEntry::Curve(CurveMode::Linear));
        assert_eq!(entries[3], CatalogEntry::Separator);

        let curves: Vec<_> = entries.iter().filter_map(CatalogEntry::curve).collect();
        assert_eq!(curves, CurveMode::ALL.to_vec());
    }
}
