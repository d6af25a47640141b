//! Error types for knowledge loading and answer collection.

use crate::knowledge::Table;
use crate::shared::Dimension;

pub type KnowledgeResult<T> = Result<T, KnowledgeError>;

/// Knowledge base construction errors. Any of these aborts the snapshot being built.
#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error("failed to read {table} table from {origin}: {source}")]
    Read {
        table: Table,
        origin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {table} table: {source}")]
    Malformed {
        table: Table,
        #[source]
        source: csv::Error,
    },

    #[error("{table} table lacks required columns: {}", .columns.join(", "))]
    MissingColumns { table: Table, columns: Vec<String> },

    #[error("rule {code} gives {points} points to {dimension}, more than a rule can carry")]
    PointsOutOfRange {
        code: String,
        dimension: Dimension,
        points: i64,
    },

    #[error("question {id} continues at line {line} after rows of another question")]
    NonContiguousQuestion { id: String, line: u64 },

    #[error("major '{name}' appears more than once in the majors table")]
    DuplicateMajor { name: String },
}

/// Answer-sheet errors raised before the engine is invoked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerError {
    #[error("incomplete answer set: {} of {total} questions unanswered", .missing.len())]
    Incomplete { missing: Vec<String>, total: usize },
}
