//! Fixed-template explanation naming a major's two dominant dimensions.

use crate::shared::{Dimension, DimensionScores};

/// Primary orientation reported for a profile with no positive weight.
pub const PRIMARY_FALLBACK: Dimension = Dimension::Realistic;

/// Secondary orientation reported when the runner-up weight is zero.
pub const SECONDARY_FALLBACK: Dimension = Dimension::Investigative;

/// Primary and secondary orientation of a major's ideal profile.
///
/// Weights are ranked descending with canonical tie order. A zero-weight slot falls back
/// to [`PRIMARY_FALLBACK`] / [`SECONDARY_FALLBACK`]; the secondary never repeats the
/// primary, so a profile dominated by Investigative alone gets Realistic as secondary.
pub fn orientation(profile: &DimensionScores) -> (Dimension, Dimension) {
    let ranked = profile.ranked();
    let primary = match ranked.first() {
        Some(&(dimension, weight)) if weight > 0 => dimension,
        _ => PRIMARY_FALLBACK,
    };
    let secondary = match ranked.get(1) {
        Some(&(dimension, weight)) if weight > 0 => dimension,
        _ if primary == SECONDARY_FALLBACK => PRIMARY_FALLBACK,
        _ => SECONDARY_FALLBACK,
    };
    (primary, secondary)
}

/// Explanation sentence for `major`. Depends only on the major's own profile, not on the
/// respondent.
pub fn explain(major: &str, profile: &DimensionScores) -> String {
    let (primary, secondary) = orientation(profile);
    format!(
        "Jurusan {} sangat cocok dengan profilmu. Jurusan ini membutuhkan dominasi tipe {} dan {}. \
         Berdasarkan analisis, minat dan potensimu selaras dengan kompetensi inti di bidang ini.",
        major,
        primary.label(),
        secondary.label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_two_highest_weights() {
        let psikologi = DimensionScores::new([0, 1, 1, 5, 1, 0]);
        assert_eq!(orientation(&psikologi), (Dimension::Social, Dimension::Investigative));
        let text = explain("Psikologi", &psikologi);
        assert!(text.contains("Jurusan Psikologi"));
        assert!(text.contains("tipe Social dan Investigative"));
    }

    #[test]
    fn all_zero_profile_uses_fixed_fallbacks() {
        let empty = DimensionScores::default();
        assert_eq!(orientation(&empty), (Dimension::Realistic, Dimension::Investigative));
        assert!(explain("Kosong", &empty).contains("tipe Realistic dan Investigative"));
    }

    #[test]
    fn single_dimension_profile_gets_fallback_secondary() {
        let mesin = DimensionScores::new([5, 0, 0, 0, 0, 0]);
        assert_eq!(orientation(&mesin), (Dimension::Realistic, Dimension::Investigative));
        let riset = DimensionScores::new([0, 4, 0, 0, 0, 0]);
        assert_eq!(orientation(&riset), (Dimension::Investigative, Dimension::Realistic));
    }

    #[test]
    fn ties_follow_canonical_order() {
        let tied = DimensionScores::new([0, 0, 3, 0, 3, 3]);
        assert_eq!(orientation(&tied), (Dimension::Artistic, Dimension::Enterprising));
    }
}
