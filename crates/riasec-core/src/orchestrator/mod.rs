//! Inference entry point: scorer -> matcher -> explainer over a knowledge snapshot.

mod explainer;
mod matcher;
mod scorer;

pub use explainer::{explain, orientation, PRIMARY_FALLBACK, SECONDARY_FALLBACK};
pub use matcher::{
    cosine_similarity, rank, similarity, MatchPolicy, RankedMajor, Rounding, SCORE_DECIMALS,
    SCORE_SCALE,
};
pub use scorer::score;

use serde::Serialize;

use crate::knowledge::KnowledgeBase;
use crate::shared::{DimensionScores, InterestVector};

/// Number of letters in a dominant code ("RIC").
pub const PROFILE_LETTERS: usize = 3;

/// One major's place in the ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub major: String,
    /// Dominant code of the major's ideal profile.
    pub riasec_code: String,
    /// Match score in [0, 10].
    pub score: f64,
    pub explanation: String,
    pub profile: DimensionScores,
}

/// Outcome of one inference call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inference {
    /// The respondent's three strongest dimensions, strongest first.
    pub student_profile: String,
    pub scores: InterestVector,
    /// Every major, best match first.
    pub results: Vec<MatchResult>,
}

impl Inference {
    /// The first `n` results (fewer if the catalog is smaller).
    pub fn top(&self, n: usize) -> &[MatchResult] {
        &self.results[..n.min(self.results.len())]
    }
}

/// Runs inference against an injected knowledge snapshot.
#[derive(Debug, Clone, Default)]
pub struct Orchestrator {
    policy: MatchPolicy,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    /// Scores `codes`, ranks every major in `kb` and explains each one.
    pub fn infer<S: AsRef<str>>(&self, kb: &KnowledgeBase, codes: &[S]) -> Inference {
        let scores = score(codes, kb.rules());
        let student_profile = scores.dominant_code(PROFILE_LETTERS);

        let results: Vec<MatchResult> = rank(&scores, kb.majors(), &self.policy)
            .into_iter()
            .map(|ranked| MatchResult {
                major: ranked.major.name.clone(),
                riasec_code: ranked.major.weights.dominant_code(PROFILE_LETTERS),
                score: ranked.score,
                explanation: explain(&ranked.major.name, &ranked.major.weights),
                profile: ranked.major.weights,
            })
            .collect();

        tracing::debug!(
            target: "riasec::engine",
            answers = codes.len(),
            profile = %student_profile,
            majors = results.len(),
            best = results.first().map(|r| r.major.as_str()).unwrap_or("-"),
            "inference complete"
        );

        Inference {
            student_profile,
            scores,
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::{build, DuplicateMajorPolicy, RawTables};

    fn knowledge() -> KnowledgeBase {
        let tables = RawTables {
            questions: "id,kategori,teks,option_value,option_text\n1,Minat,Pilih satu,a,Mesin\n1,Minat,Pilih satu,b,Riset\n".to_string(),
            rules: "code,R,I,A,S,E,C\nQ1a,3,0,0,0,0,0\nQ1b,0,3,0,0,0,0\n".to_string(),
            majors: "nama_jurusan,R,I,A,S,E,C\nPsikologi,0,1,1,5,1,0\nTeknik Mesin,5,1,0,0,0,0\nKosong,0,0,0,0,0,0\n".to_string(),
        };
        build(&tables, DuplicateMajorPolicy::Overwrite).unwrap()
    }

    #[test]
    fn infers_profile_scores_and_ranking() {
        let inference = Orchestrator::new().infer(&knowledge(), &["Q1a"]);
        assert_eq!(inference.scores, DimensionScores::new([3, 0, 0, 0, 0, 0]));
        assert_eq!(inference.student_profile, "RIA");
        let names: Vec<_> = inference.results.iter().map(|r| r.major.as_str()).collect();
        assert_eq!(names, vec!["Teknik Mesin", "Psikologi", "Kosong"]);

        let mesin = &inference.results[0];
        assert_eq!(mesin.riasec_code, "RIA");
        assert_eq!(mesin.profile[crate::Dimension::Realistic], 5);
        assert!(mesin.explanation.contains("Teknik Mesin"));
        assert_eq!(inference.results[1].score, 0.0);
        assert_eq!(inference.results[1].riasec_code, "SIA");
    }

    #[test]
    fn degenerate_major_scores_zero_with_default_orientation() {
        let inference = Orchestrator::new().infer(&knowledge(), &["Q1b"]);
        let kosong = inference.results.iter().find(|r| r.major == "Kosong").unwrap();
        assert_eq!(kosong.score, 0.0);
        assert!(kosong.explanation.contains("Realistic dan Investigative"));
    }

    #[test]
    fn empty_answer_set_scores_everything_zero() {
        let inference = Orchestrator::new().infer::<&str>(&knowledge(), &[]);
        assert!(inference.scores.is_zero());
        assert_eq!(inference.student_profile, "RIA");
        assert!(inference.results.iter().all(|r| r.score == 0.0));
        let names: Vec<_> = inference.results.iter().map(|r| r.major.as_str()).collect();
        assert_eq!(names, vec!["Psikologi", "Teknik Mesin", "Kosong"]);
    }

    #[test]
    fn top_is_clamped_to_catalog_size() {
        let inference = Orchestrator::new().infer(&knowledge(), &["Q1a"]);
        assert_eq!(inference.top(2).len(), 2);
        assert_eq!(inference.top(10).len(), 3);
    }

    #[test]
    fn half_up_policy_changes_only_rounding() {
        let policy = MatchPolicy {
            rounding: Rounding::HalfUp,
            ..MatchPolicy::default()
        };
        let orchestrator = Orchestrator::with_policy(policy);
        assert_eq!(orchestrator.policy().rounding, Rounding::HalfUp);
        let inference = orchestrator.infer(&knowledge(), &["Q1a"]);
        assert_eq!(inference.results[0].score, 9.81);
    }
}
