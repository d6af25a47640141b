//! Raw table access: where the three CSV tables come from.

use std::fmt;
use std::path::{Path, PathBuf};

use super::KnowledgeSource;
use crate::error::{KnowledgeError, KnowledgeResult};

/// The three tabular inputs of the knowledge base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Questions,
    Rules,
    Majors,
}

impl Table {
    pub const ALL: [Self; 3] = [Self::Questions, Self::Rules, Self::Majors];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Questions => "questions",
            Self::Rules => "rules",
            Self::Majors => "majors",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// File names of the three tables inside a data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFiles {
    pub questions: String,
    pub rules: String,
    pub majors: String,
}

impl Default for TableFiles {
    fn default() -> Self {
        Self {
            questions: "questions.csv".to_string(),
            rules: "rules.csv".to_string(),
            majors: "jurusan.csv".to_string(),
        }
    }
}

impl TableFiles {
    pub fn file_for(&self, table: Table) -> &str {
        match table {
            Table::Questions => &self.questions,
            Table::Rules => &self.rules,
            Table::Majors => &self.majors,
        }
    }
}

/// Raw text of all three tables, read together so one snapshot never mixes versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTables {
    pub questions: String,
    pub rules: String,
    pub majors: String,
}

impl RawTables {
    /// Reads every table from `source`.
    pub fn read(source: &dyn KnowledgeSource) -> KnowledgeResult<Self> {
        let read = |table: Table| {
            source.read_table(table).map_err(|e| KnowledgeError::Read {
                table,
                origin: source.name().to_string(),
                source: e,
            })
        };
        Ok(Self {
            questions: read(Table::Questions)?,
            rules: read(Table::Rules)?,
            majors: read(Table::Majors)?,
        })
    }

    pub fn get(&self, table: Table) -> &str {
        match table {
            Table::Questions => &self.questions,
            Table::Rules => &self.rules,
            Table::Majors => &self.majors,
        }
    }

    /// Hex blake3 digest over all three tables. Each table is length-prefixed so moving
    /// bytes between tables changes the hash.
    pub fn content_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for table in Table::ALL {
            let text = self.get(table);
            hasher.update(&(text.len() as u64).to_le_bytes());
            hasher.update(text.as_bytes());
        }
        hasher.finalize().to_hex().to_string()
    }
}

/// Tables stored as files under one directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    files: TableFiles,
    label: String,
}

impl DirectorySource {
    /// Uses the default file names (`questions.csv`, `rules.csv`, `jurusan.csv`).
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self::with_files(root, TableFiles::default())
    }

    pub fn with_files<P: AsRef<Path>>(root: P, files: TableFiles) -> Self {
        let root = root.as_ref().to_path_buf();
        let label = root.display().to_string();
        Self { root, files, label }
    }

    pub fn path_for(&self, table: Table) -> PathBuf {
        self.root.join(self.files.file_for(table))
    }
}

impl KnowledgeSource for DirectorySource {
    fn name(&self) -> &str {
        &self.label
    }

    fn read_table(&self, table: Table) -> std::io::Result<String> {
        std::fs::read_to_string(self.path_for(table))
    }
}

/// Tables held in memory, e.g. embedded data or test fixtures.
#[derive(Debug, Clone)]
pub struct InlineSource {
    tables: RawTables,
}

impl InlineSource {
    pub fn new(
        questions: impl Into<String>,
        rules: impl Into<String>,
        majors: impl Into<String>,
    ) -> Self {
        Self {
            tables: RawTables {
                questions: questions.into(),
                rules: rules.into(),
                majors: majors.into(),
            },
        }
    }
}

impl KnowledgeSource for InlineSource {
    fn name(&self) -> &str {
        "inline"
    }

    fn read_table(&self, table: Table) -> std::io::Result<String> {
        Ok(self.tables.get(table).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_hash_tracks_table_boundaries() {
        let a = RawTables {
            questions: "ab".into(),
            rules: "c".into(),
            majors: String::new(),
        };
        let b = RawTables {
            questions: "a".into(),
            rules: "bc".into(),
            majors: String::new(),
        };
        assert_ne!(a.content_hash(), b.content_hash());
        assert_eq!(a.content_hash(), a.clone().content_hash());
    }

    #[test]
    fn missing_directory_reports_table_and_origin() {
        let source = DirectorySource::new("./definitely/not/here");
        let err = RawTables::read(&source).unwrap_err();
        match err {
            KnowledgeError::Read { table, origin, .. } => {
                assert_eq!(table, Table::Questions);
                assert!(origin.contains("not/here"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
