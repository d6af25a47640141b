//! Shared types used across the core: RIASEC dimensions, dense score maps and configuration.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::ops::Index;
use std::path::PathBuf;

use crate::knowledge::{DirectorySource, DuplicateMajorPolicy, TableFiles};
use crate::orchestrator::{MatchPolicy, Rounding};

/// Full names of the six dimensions, in canonical order.
pub const DIMENSION_LABELS: [&str; 6] = [
    "Realistic",
    "Investigative",
    "Artistic",
    "Social",
    "Enterprising",
    "Conventional",
];

/// RIASEC interest dimension. Declaration order (R, I, A, S, E, C) is the tie-break order
/// used wherever dimensions with equal scores have to be ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dimension {
    #[serde(rename = "R")]
    Realistic = 0,
    #[serde(rename = "I")]
    Investigative = 1,
    #[serde(rename = "A")]
    Artistic = 2,
    #[serde(rename = "S")]
    Social = 3,
    #[serde(rename = "E")]
    Enterprising = 4,
    #[serde(rename = "C")]
    Conventional = 5,
}

impl Dimension {
    /// All dimensions in canonical order.
    pub const ALL: [Self; 6] = [
        Self::Realistic,
        Self::Investigative,
        Self::Artistic,
        Self::Social,
        Self::Enterprising,
        Self::Conventional,
    ];

    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Single-letter code (`R`, `I`, ...).
    pub fn letter(&self) -> char {
        match self {
            Self::Realistic => 'R',
            Self::Investigative => 'I',
            Self::Artistic => 'A',
            Self::Social => 'S',
            Self::Enterprising => 'E',
            Self::Conventional => 'C',
        }
    }

    /// Full human-readable name.
    #[inline]
    pub fn label(&self) -> &'static str {
        DIMENSION_LABELS[self.index()]
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Dense Dimension -> non-negative integer map. Used both for a respondent's accumulated
/// interest vector and for a major's ideal profile. Slots are 64-bit so that summing
/// 32-bit rule points stays exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DimensionScores {
    values: [u64; 6],
}

/// A respondent's accumulated score per dimension.
pub type InterestVector = DimensionScores;

impl DimensionScores {
    pub fn new(values: [u64; 6]) -> Self {
        Self { values }
    }

    #[inline]
    pub fn get(&self, dimension: Dimension) -> u64 {
        self.values[dimension.index()]
    }

    /// Adds `points` to a dimension.
    #[inline]
    pub fn add(&mut self, dimension: Dimension, points: u32) {
        let slot = &mut self.values[dimension.index()];
        *slot = slot.saturating_add(u64::from(points));
    }

    pub fn total(&self) -> u64 {
        self.values.iter().fold(0u64, |acc, &v| acc.saturating_add(v))
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|&v| v == 0)
    }

    /// (dimension, value) pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, u64)> + '_ {
        Dimension::ALL.iter().map(move |&d| (d, self.get(d)))
    }

    /// Pairs sorted by value descending. The sort is stable, so equal values keep
    /// canonical R, I, A, S, E, C order.
    pub fn ranked(&self) -> Vec<(Dimension, u64)> {
        let mut pairs: Vec<(Dimension, u64)> = self.iter().collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1));
        pairs
    }

    /// Concatenated letters of the `n` highest-valued dimensions (e.g. "RIC").
    pub fn dominant_code(&self, n: usize) -> String {
        self.ranked().into_iter().take(n).map(|(d, _)| d.letter()).collect()
    }

    /// The single highest-valued dimension; Realistic for an all-zero map.
    pub fn dominant(&self) -> Dimension {
        self.ranked()
            .first()
            .map(|(d, _)| *d)
            .unwrap_or(Dimension::Realistic)
    }

    /// L1-normalized proportions summing to 1. All zeros when the total is zero.
    pub fn proportions(&self) -> [f64; 6] {
        let total = self.total();
        let mut out = [0.0; 6];
        if total == 0 {
            return out;
        }
        for (slot, &v) in out.iter_mut().zip(self.values.iter()) {
            *slot = v as f64 / total as f64;
        }
        out
    }
}

impl Index<Dimension> for DimensionScores {
    type Output = u64;

    fn index(&self, dimension: Dimension) -> &u64 {
        &self.values[dimension.index()]
    }
}

impl Serialize for DimensionScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Dimension::ALL.len()))?;
        for (d, v) in self.iter() {
            map.serialize_entry(&d, &v)?;
        }
        map.end()
    }
}

/// Engine and gateway configuration. Load from TOML or env.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Display name reported by the gateway.
    pub app_name: String,
    /// HTTP port for the gateway.
    pub port: u16,
    /// Directory holding the three knowledge tables.
    pub data_dir: String,
    #[serde(default = "default_questions_file")]
    pub questions_file: String,
    #[serde(default = "default_rules_file")]
    pub rules_file: String,
    #[serde(default = "default_majors_file")]
    pub majors_file: String,
    /// What to do when the majors table repeats a name.
    #[serde(default)]
    pub duplicate_majors: DuplicateMajorPolicy,
    /// Rounding rule for the 0–10 match score.
    #[serde(default)]
    pub score_rounding: Rounding,
    /// How many results the presentation layer shows.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_questions_file() -> String {
    TableFiles::default().questions
}

fn default_rules_file() -> String {
    TableFiles::default().rules
}

fn default_majors_file() -> String {
    TableFiles::default().majors
}

fn default_top_n() -> usize {
    3
}

impl Default for CoreConfig {
    fn default() -> Self {
        let files = TableFiles::default();
        Self {
            app_name: "RIASEC Major Matcher".to_string(),
            port: 8001,
            data_dir: "./data".to_string(),
            questions_file: files.questions,
            rules_file: files.rules,
            majors_file: files.majors,
            duplicate_majors: DuplicateMajorPolicy::default(),
            score_rounding: Rounding::default(),
            top_n: default_top_n(),
        }
    }
}

impl CoreConfig {
    /// Load config from file and environment. Precedence: env `RIASEC__*` > file named by
    /// `RIASEC_CONFIG` (default `config/engine`, optional) > defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("RIASEC_CONFIG").unwrap_or_else(|_| "config/engine".to_string());
        let defaults = Self::default();
        let builder = config::Config::builder()
            .set_default("app_name", defaults.app_name)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("data_dir", defaults.data_dir)?
            .set_default("questions_file", defaults.questions_file)?
            .set_default("rules_file", defaults.rules_file)?
            .set_default("majors_file", defaults.majors_file)?
            .set_default("duplicate_majors", "overwrite")?
            .set_default("score_rounding", "half_even")?
            .set_default("top_n", defaults.top_n as i64)?;

        let built = builder
            .add_source(config::File::with_name(&config_path).required(false))
            .add_source(config::Environment::with_prefix("RIASEC").separator("__"))
            .build()?;

        built.try_deserialize()
    }

    /// File names of the three tables.
    pub fn table_files(&self) -> TableFiles {
        TableFiles {
            questions: self.questions_file.clone(),
            rules: self.rules_file.clone(),
            majors: self.majors_file.clone(),
        }
    }

    /// Directory-backed knowledge source described by this config.
    pub fn directory_source(&self) -> DirectorySource {
        DirectorySource::with_files(PathBuf::from(&self.data_dir), self.table_files())
    }

    pub fn match_policy(&self) -> MatchPolicy {
        MatchPolicy {
            rounding: self.score_rounding,
            ..MatchPolicy::default()
        }
    }
}
