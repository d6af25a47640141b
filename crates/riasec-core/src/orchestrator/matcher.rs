//! Cosine similarity on L1-normalized profiles, scaled to a 0–10 match score.

use serde::{Deserialize, Serialize};

use crate::knowledge::{MajorProfile, MajorTable};
use crate::shared::{DimensionScores, InterestVector};

/// Upper bound of the human-facing match score.
pub const SCORE_SCALE: f64 = 10.0;

/// Decimal places kept in the match score.
pub const SCORE_DECIMALS: u32 = 2;

/// Rounding rule applied to the scaled score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// Ties go to the even neighbour (8.125 -> 8.12).
    #[default]
    HalfEven,
    /// Ties go up (8.125 -> 8.13).
    HalfUp,
}

impl Rounding {
    pub fn round(&self, value: f64, decimals: u32) -> f64 {
        let factor = 10f64.powi(decimals as i32);
        let scaled = value * factor;
        let rounded = match self {
            Self::HalfEven => scaled.round_ties_even(),
            Self::HalfUp => (scaled + 0.5).floor(),
        };
        rounded / factor
    }
}

/// Scale and rounding of the match score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchPolicy {
    pub scale: f64,
    pub decimals: u32,
    pub rounding: Rounding,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            scale: SCORE_SCALE,
            decimals: SCORE_DECIMALS,
            rounding: Rounding::default(),
        }
    }
}

fn magnitude(v: &[f64; 6]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Unrounded cosine similarity in [0, 1]. Zero when either side has no points.
pub fn cosine_similarity(student: &InterestVector, profile: &DimensionScores) -> f64 {
    if student.total() == 0 || profile.total() == 0 {
        return 0.0;
    }
    let s = student.proportions();
    let m = profile.proportions();
    let dot: f64 = s.iter().zip(m.iter()).map(|(a, b)| a * b).sum();
    let s_mag = magnitude(&s);
    let m_mag = magnitude(&m);
    if s_mag == 0.0 || m_mag == 0.0 {
        return 0.0;
    }
    (dot / (s_mag * m_mag)).clamp(0.0, 1.0)
}

/// Match score: cosine similarity scaled and rounded per `policy`.
pub fn similarity(student: &InterestVector, profile: &DimensionScores, policy: &MatchPolicy) -> f64 {
    let cosine = cosine_similarity(student, profile);
    policy.rounding.round(cosine * policy.scale, policy.decimals)
}

/// A major with its match score, before an explanation is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedMajor<'a> {
    pub major: &'a MajorProfile,
    pub score: f64,
}

/// Scores every major and sorts descending. The sort is stable: equal scores keep the
/// majors table order.
pub fn rank<'a>(
    student: &InterestVector,
    majors: &'a MajorTable,
    policy: &MatchPolicy,
) -> Vec<RankedMajor<'a>> {
    let mut ranked: Vec<RankedMajor<'a>> = majors
        .iter()
        .map(|major| RankedMajor {
            major,
            score: similarity(student, &major.weights, policy),
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}
