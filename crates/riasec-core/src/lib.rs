//! riasec-core: RIASEC interest inference (knowledge base, scorer, matcher, explainer).
//!
//! The knowledge base is an explicit immutable snapshot; the orchestrator borrows it for
//! each inference call instead of reading global state.

mod answers;
mod error;
mod knowledge;
mod orchestrator;
mod shared;

// Shared
pub use shared::{CoreConfig, Dimension, DimensionScores, InterestVector, DIMENSION_LABELS};

// Errors
pub use error::{AnswerError, KnowledgeError, KnowledgeResult};

// Answer sheet
pub use answers::collect_answer_codes;

// Knowledge base
pub use knowledge::{
    build, load, parse_majors, parse_questions, parse_rules, AnswerCode, AnswerOption,
    DirectorySource, DuplicateMajorPolicy, InlineSource, KnowledgeBase, KnowledgeCache,
    KnowledgeSource, MajorProfile, MajorTable, Question, RawTables, Rule, RuleTable, Table,
    TableFiles,
};

// Orchestrator
pub use orchestrator::{
    cosine_similarity, explain, orientation, rank, score, similarity, Inference, MatchPolicy,
    MatchResult, Orchestrator, RankedMajor, Rounding, PRIMARY_FALLBACK, PROFILE_LETTERS,
    SCORE_DECIMALS, SCORE_SCALE, SECONDARY_FALLBACK,
};
