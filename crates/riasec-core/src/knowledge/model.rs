//! Typed knowledge records: questions, answer codes, rules, major profiles and the
//! immutable [`KnowledgeBase`] snapshot that owns them.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::shared::{Dimension, DimensionScores};

/// Answer token consumed by the scorer: `"Q" + question id + option value`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerCode(String);

impl AnswerCode {
    /// Builds the code for `option_value` chosen on question `question_id` ("3", "b" -> "Q3b").
    pub fn new(question_id: &str, option_value: &str) -> Self {
        Self(format!("Q{}{}", question_id, option_value))
    }

    /// Wraps an already-formed code as read from the rules table.
    pub fn from_raw(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for AnswerCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AnswerCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnswerCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One selectable answer of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerOption {
    pub value: String,
    pub text: String,
}

/// A questionnaire item with its options in table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: String,
    pub category: String,
    pub text: String,
    pub options: Vec<AnswerOption>,
}

/// Sparse point distribution attached to an answer code. Only strictly positive points
/// are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    code: AnswerCode,
    points: BTreeMap<Dimension, u32>,
}

impl Rule {
    /// Builds a rule, dropping every zero entry.
    pub fn new(code: AnswerCode, points: impl IntoIterator<Item = (Dimension, u32)>) -> Self {
        let points = points.into_iter().filter(|(_, p)| *p > 0).collect();
        Self { code, points }
    }

    pub fn code(&self) -> &AnswerCode {
        &self.code
    }

    /// Points for one dimension; zero when the dimension is absent.
    pub fn points(&self, dimension: Dimension) -> u32 {
        self.points.get(&dimension).copied().unwrap_or(0)
    }

    /// Non-zero (dimension, points) entries in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, u32)> + '_ {
        self.points.iter().map(|(d, p)| (*d, *p))
    }

    pub fn total(&self) -> u64 {
        self.points.values().map(|&p| u64::from(p)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Answer code -> rule lookup.
pub type RuleTable = HashMap<AnswerCode, Rule>;

/// A major and its ideal weight per dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MajorProfile {
    pub name: String,
    pub weights: DimensionScores,
}

/// How the majors table treats a name that appears twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateMajorPolicy {
    /// Later row replaces the earlier one but keeps the earlier row's position.
    #[default]
    Overwrite,
    /// Duplicate names fail the load.
    Reject,
}

/// Majors keyed by name, iterated in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MajorTable {
    entries: Vec<MajorProfile>,
    index: HashMap<String, usize>,
}

impl MajorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a profile. An existing entry with the same name is replaced in place and
    /// returned.
    pub fn insert(&mut self, profile: MajorProfile) -> Option<MajorProfile> {
        match self.index.get(&profile.name) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos], profile)),
            None => {
                self.index.insert(profile.name.clone(), self.entries.len());
                self.entries.push(profile);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&MajorProfile> {
        self.index.get(name).map(|&pos| &self.entries[pos])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MajorProfile> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<MajorProfile> for MajorTable {
    fn from_iter<T: IntoIterator<Item = MajorProfile>>(iter: T) -> Self {
        let mut table = Self::new();
        for profile in iter {
            table.insert(profile);
        }
        table
    }
}

impl<'a> IntoIterator for &'a MajorTable {
    type Item = &'a MajorProfile;
    type IntoIter = std::slice::Iter<'a, MajorProfile>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Immutable snapshot of the three knowledge tables.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    questions: Vec<Question>,
    rules: RuleTable,
    majors: MajorTable,
    content_hash: String,
}

impl KnowledgeBase {
    pub fn new(
        questions: Vec<Question>,
        rules: RuleTable,
        majors: MajorTable,
        content_hash: impl Into<String>,
    ) -> Self {
        Self {
            questions,
            rules,
            majors,
            content_hash: content_hash.into(),
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn majors(&self) -> &MajorTable {
        &self.majors
    }

    /// Hex blake3 hash of the raw tables this snapshot was built from.
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    /// Number of majors whose highest weight falls on each dimension. Ties go to the
    /// first dimension in canonical order; an all-zero profile counts toward Realistic.
    pub fn dominant_distribution(&self) -> DimensionScores {
        let mut counts = DimensionScores::default();
        for major in &self.majors {
            counts.add(major.weights.dominant(), 1);
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, weights: [u64; 6]) -> MajorProfile {
        MajorProfile {
            name: name.to_string(),
            weights: DimensionScores::new(weights),
        }
    }

    #[test]
    fn answer_code_concatenates_question_and_option() {
        assert_eq!(AnswerCode::new("3", "b").as_str(), "Q3b");
        assert_eq!(AnswerCode::new("12", "a"), AnswerCode::from_raw("Q12a"));
    }

    #[test]
    fn rule_drops_zero_points() {
        let rule = Rule::new(
            AnswerCode::from_raw("Q1a"),
            [
                (Dimension::Realistic, 3),
                (Dimension::Investigative, 0),
                (Dimension::Artistic, 0),
                (Dimension::Conventional, 1),
            ],
        );
        let kept: Vec<_> = rule.iter().collect();
        assert_eq!(kept, vec![(Dimension::Realistic, 3), (Dimension::Conventional, 1)]);
        assert_eq!(rule.points(Dimension::Artistic), 0);
        assert_eq!(rule.total(), 4);
    }

    #[test]
    fn duplicate_major_overwrites_in_place() {
        let mut table = MajorTable::new();
        table.insert(profile("Hukum", [0, 1, 0, 1, 1, 0]));
        table.insert(profile("Akuntansi", [0, 0, 0, 0, 1, 5]));
        let previous = table.insert(profile("Hukum", [0, 3, 1, 3, 4, 2]));
        assert_eq!(previous.map(|p| p.weights), Some(DimensionScores::new([0, 1, 0, 1, 1, 0])));
        assert_eq!(table.len(), 2);
        let names: Vec<_> = table.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Hukum", "Akuntansi"]);
        assert_eq!(table.get("Hukum").map(|p| p.weights[Dimension::Enterprising]), Some(4));
    }

    #[test]
    fn dominant_distribution_counts_first_max() {
        let majors: MajorTable = vec![
            profile("Teknik Mesin", [5, 1, 0, 0, 0, 0]),
            profile("Psikologi", [0, 1, 1, 5, 1, 0]),
            profile("Kosong", [0; 6]),
            profile("Seimbang", [0, 4, 0, 4, 0, 0]),
        ]
        .into_iter()
        .collect();
        let kb = KnowledgeBase::new(Vec::new(), RuleTable::new(), majors, "h");
        let dist = kb.dominant_distribution();
        assert_eq!(dist[Dimension::Realistic], 2);
        assert_eq!(dist[Dimension::Social], 1);
        assert_eq!(dist[Dimension::Investigative], 1);
        assert_eq!(dist.total(), 4);
    }
}
