//! CSV parsing for the questions, rules and majors tables.
//!
//! | Table     | Header                                           |
//! |-----------|--------------------------------------------------|
//! | questions | `id,kategori,teks,option_value,option_text`      |
//! | rules     | `code,R,I,A,S,E,C`                               |
//! | majors    | `nama_jurusan,R,I,A,S,E,C`                       |
//!
//! Every loader fails fast: a missing column, a non-integer score or a rule point beyond
//! 32 bits aborts the load and no partial table is returned. The header row is checked
//! before any record, so an empty file is an error rather than an empty table.

use serde::Deserialize;
use std::collections::HashSet;

use super::model::{
    AnswerCode, AnswerOption, DuplicateMajorPolicy, KnowledgeBase, MajorProfile, MajorTable,
    Question, Rule, RuleTable,
};
use super::source::{RawTables, Table};
use super::KnowledgeSource;
use crate::error::{KnowledgeError, KnowledgeResult};
use crate::shared::{Dimension, DimensionScores};

#[derive(Debug, Deserialize)]
struct QuestionRow {
    id: String,
    kategori: String,
    teks: String,
    option_value: String,
    option_text: String,
}

#[derive(Debug, Deserialize)]
struct RuleRow {
    code: String,
    #[serde(rename = "R")]
    r: i64,
    #[serde(rename = "I")]
    i: i64,
    #[serde(rename = "A")]
    a: i64,
    #[serde(rename = "S")]
    s: i64,
    #[serde(rename = "E")]
    e: i64,
    #[serde(rename = "C")]
    c: i64,
}

#[derive(Debug, Deserialize)]
struct MajorRow {
    nama_jurusan: String,
    #[serde(rename = "R")]
    r: u32,
    #[serde(rename = "I")]
    i: u32,
    #[serde(rename = "A")]
    a: u32,
    #[serde(rename = "S")]
    s: u32,
    #[serde(rename = "E")]
    e: u32,
    #[serde(rename = "C")]
    c: u32,
}

const QUESTION_COLUMNS: [&str; 5] = ["id", "kategori", "teks", "option_value", "option_text"];
const RULE_COLUMNS: [&str; 7] = ["code", "R", "I", "A", "S", "E", "C"];
const MAJOR_COLUMNS: [&str; 7] = ["nama_jurusan", "R", "I", "A", "S", "E", "C"];

fn csv_reader(text: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes())
}

fn malformed(table: Table) -> impl Fn(csv::Error) -> KnowledgeError {
    move |source| KnowledgeError::Malformed { table, source }
}

fn require_columns(
    reader: &mut csv::Reader<&[u8]>,
    table: Table,
    required: &[&str],
) -> KnowledgeResult<csv::StringRecord> {
    let headers = reader.headers().map_err(malformed(table))?.clone();
    let missing: Vec<String> = required
        .iter()
        .filter(|column| !headers.iter().any(|h| h == **column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(KnowledgeError::MissingColumns { table, columns: missing });
    }
    Ok(headers)
}

/// Zero for non-positive values; an error past `u32::MAX`.
fn rule_points(code: &str, dimension: Dimension, value: i64) -> KnowledgeResult<u32> {
    if value <= 0 {
        return Ok(0);
    }
    u32::try_from(value).map_err(|_| KnowledgeError::PointsOutOfRange {
        code: code.to_string(),
        dimension,
        points: value,
    })
}

/// Groups consecutive rows with the same id into one [`Question`]. Rows of one question
/// must be contiguous; an id that comes back after another id is rejected.
pub fn parse_questions(text: &str) -> KnowledgeResult<Vec<Question>> {
    let mut reader = csv_reader(text);
    let headers = require_columns(&mut reader, Table::Questions, &QUESTION_COLUMNS)?;

    let mut questions: Vec<Question> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for result in reader.records() {
        let record = result.map_err(malformed(Table::Questions))?;
        let row: QuestionRow = record
            .deserialize(Some(&headers))
            .map_err(malformed(Table::Questions))?;
        let option = AnswerOption {
            value: row.option_value,
            text: row.option_text,
        };

        if let Some(current) = questions.last_mut().filter(|q| q.id == row.id) {
            current.options.push(option);
            continue;
        }
        if !seen.insert(row.id.clone()) {
            return Err(KnowledgeError::NonContiguousQuestion {
                id: row.id,
                line: record.position().map(|p| p.line()).unwrap_or(0),
            });
        }
        questions.push(Question {
            id: row.id,
            category: row.kategori,
            text: row.teks,
            options: vec![option],
        });
    }
    Ok(questions)
}

/// Parses the rules table. Zero and negative points are dropped from each rule.
pub fn parse_rules(text: &str) -> KnowledgeResult<RuleTable> {
    let mut reader = csv_reader(text);
    require_columns(&mut reader, Table::Rules, &RULE_COLUMNS)?;
    let mut rules = RuleTable::new();
    for row in reader.deserialize::<RuleRow>() {
        let row = row.map_err(malformed(Table::Rules))?;
        let points = [
            (Dimension::Realistic, row.r),
            (Dimension::Investigative, row.i),
            (Dimension::Artistic, row.a),
            (Dimension::Social, row.s),
            (Dimension::Enterprising, row.e),
            (Dimension::Conventional, row.c),
        ]
        .into_iter()
        .map(|(d, value)| rule_points(&row.code, d, value).map(|p| (d, p)))
        .collect::<KnowledgeResult<Vec<_>>>()?;
        let code = AnswerCode::from_raw(row.code);
        let rule = Rule::new(code.clone(), points);
        if let Some(previous) = rules.insert(code, rule) {
            tracing::debug!(
                target: "riasec::knowledge",
                code = %previous.code(),
                "rules table repeats an answer code; later row wins"
            );
        }
    }
    Ok(rules)
}

/// Parses the majors table. All six weights are required; zero is a valid weight.
pub fn parse_majors(text: &str, policy: DuplicateMajorPolicy) -> KnowledgeResult<MajorTable> {
    let mut reader = csv_reader(text);
    require_columns(&mut reader, Table::Majors, &MAJOR_COLUMNS)?;
    let mut majors = MajorTable::new();
    for row in reader.deserialize::<MajorRow>() {
        let row = row.map_err(malformed(Table::Majors))?;
        let profile = MajorProfile {
            name: row.nama_jurusan,
            weights: DimensionScores::new([row.r, row.i, row.a, row.s, row.e, row.c].map(u64::from)),
        };
        if majors.contains(&profile.name) {
            match policy {
                DuplicateMajorPolicy::Reject => {
                    return Err(KnowledgeError::DuplicateMajor { name: profile.name });
                }
                DuplicateMajorPolicy::Overwrite => {
                    tracing::warn!(
                        target: "riasec::knowledge",
                        major = %profile.name,
                        "majors table repeats a name; later row overwrites the earlier one"
                    );
                }
            }
        }
        majors.insert(profile);
    }
    Ok(majors)
}

/// Builds a snapshot from raw table text.
pub fn build(tables: &RawTables, policy: DuplicateMajorPolicy) -> KnowledgeResult<KnowledgeBase> {
    let questions = parse_questions(&tables.questions)?;
    let rules = parse_rules(&tables.rules)?;
    let majors = parse_majors(&tables.majors, policy)?;
    let kb = KnowledgeBase::new(questions, rules, majors, tables.content_hash());
    tracing::info!(
        target: "riasec::knowledge",
        questions = kb.questions().len(),
        rules = kb.rules().len(),
        majors = kb.majors().len(),
        hash = %kb.content_hash(),
        "knowledge base built"
    );
    Ok(kb)
}

/// Reads all tables from `source` and builds a snapshot.
pub fn load(source: &dyn KnowledgeSource, policy: DuplicateMajorPolicy) -> KnowledgeResult<KnowledgeBase> {
    let tables = RawTables::read(source)?;
    build(&tables, policy)
}
