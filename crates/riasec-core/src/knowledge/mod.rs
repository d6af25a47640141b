//! Knowledge base: questionnaire, scoring rules and major profiles.
//!
//! ## Tables
//!
//! | Table     | Default file     | Builds                                   |
//! |-----------|------------------|------------------------------------------|
//! | Questions | `questions.csv`  | ordered [`Question`]s with their options  |
//! | Rules     | `rules.csv`      | answer code -> sparse RIASEC points       |
//! | Majors    | `jurusan.csv`    | major name -> ideal RIASEC profile        |
//!
//! A [`KnowledgeBase`] is an immutable snapshot of all three tables. Build one directly
//! with [`load`], or keep one fresh with [`KnowledgeCache`].

mod cache;
mod loader;
mod model;
mod source;

pub use cache::KnowledgeCache;
pub use loader::{build, load, parse_majors, parse_questions, parse_rules};
pub use model::{
    AnswerCode, AnswerOption, DuplicateMajorPolicy, KnowledgeBase, MajorProfile, MajorTable,
    Question, Rule, RuleTable,
};
pub use source::{DirectorySource, InlineSource, RawTables, Table, TableFiles};

/// Where the raw tables come from.
pub trait KnowledgeSource: Send + Sync {
    /// Human-readable origin (a directory path, "inline", ...), used in errors and logs.
    fn name(&self) -> &str;

    /// Returns the full text of one table.
    fn read_table(&self, table: Table) -> std::io::Result<String>;
}
