mod config;
pub mod letters;
pub mod manual;

use log::{debug, info, warn};

use std::collections::HashMap;
use std::fmt::Display;

pub use crate::config::*;
use crate::letters::LetterSource;

// ******** Output data structures *********

/// Two different answers that ended up with the same code.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Collision {
    pub answer: String,
    pub shares_with: String,
    pub code: Code,
}

/// The codes assigned to the answers of one question column.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ColumnMapping {
    pub column: usize,
    /// The answer key text, taken from the header row.
    pub key: Option<String>,
    pub key_code: Option<Code>,
    /// The other answers, in order of first appearance.
    pub answers: Vec<(String, Code)>,
    pub collisions: Vec<Collision>,
    index: HashMap<String, Code>,
}

impl ColumnMapping {
    fn new(
        column: usize,
        key: Option<(String, Code)>,
        answers: Vec<(String, Code)>,
        collisions: Vec<Collision>,
    ) -> ColumnMapping {
        let mut index: HashMap<String, Code> = answers.iter().cloned().collect();
        if let Some((k, c)) = key.clone() {
            index.insert(k, c);
        }
        ColumnMapping {
            column,
            key: key.as_ref().map(|p| p.0.clone()),
            key_code: key.map(|p| p.1),
            answers,
            collisions,
            index,
        }
    }

    /// The code of an answer, as written in the sheet.
    pub fn code_for(&self, text: &str) -> Option<Code> {
        self.index.get(text).copied()
    }
}

/// Correct answers out of the answered questions.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.correct, self.total)
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct RemapResult {
    /// Header and respondent rows, each with the combined answer and score columns
    /// appended.
    pub table: Table,
    pub mappings: Vec<ColumnMapping>,
    /// One score per respondent row, in row order.
    pub scores: Vec<Score>,
}

impl RemapResult {
    /// The answer key written as codes, in column order.
    pub fn combined_key(&self) -> String {
        self.mappings
            .iter()
            .filter_map(|m| m.key_code)
            .map(|c| c.as_char())
            .collect()
    }
}

// ******** Algorithm *********

/// Builds the code mapping of a single question column.
///
/// Arguments:
/// * `column` the index of the column, for reporting
/// * `values` the respondent cells of this column
/// * `key` the text of the correct answer, if the header cell is not blank
/// * `letters` the source of randomness used to pick the code of the key
///
/// The key gets a random code. The other answers get the four remaining codes in
/// order of first appearance, counting only the answers that differ from the key, so
/// a fifth wrong answer is the first to reuse a code. A respondent answer spelled
/// exactly like the key shares the key's code. Without a key, all five codes are handed out in order.
pub fn build_column_mapping(
    column: usize,
    values: &[Cell],
    key: Option<&str>,
    rules: &RemapRules,
    letters: &mut dyn LetterSource,
) -> Result<ColumnMapping, RemapErrors> {
    let distinct = distinct_answers(values);
    debug!(
        "build_column_mapping: column: {:?} key: {:?} distinct: {:?}",
        column, key, distinct
    );

    match key {
        Some(k) => {
            let key_code = letters.pick_code();
            let free = key_code.others();
            let others: Vec<String> = distinct.into_iter().filter(|s| s != k).collect();
            let (answers, collisions) = assign_codes(column, &others, &free, rules)?;
            Ok(ColumnMapping::new(
                column,
                Some((k.to_string(), key_code)),
                answers,
                collisions,
            ))
        }
        None => {
            let (answers, collisions) = assign_codes(column, &distinct, &Code::ALL, rules)?;
            Ok(ColumnMapping::new(column, None, answers, collisions))
        }
    }
}

// The distinct non-blank answers, in order of first appearance.
fn distinct_answers(values: &[Cell]) -> Vec<String> {
    let mut res: Vec<String> = Vec::new();
    for v in values {
        let s = v.as_text();
        if !s.is_empty() && !res.contains(&s) {
            res.push(s);
        }
    }
    res
}

fn assign_codes(
    column: usize,
    answers: &[String],
    free: &[Code],
    rules: &RemapRules,
) -> Result<(Vec<(String, Code)>, Vec<Collision>), RemapErrors> {
    if answers.len() > free.len() && rules.code_overflow == CodeOverflow::Reject {
        return Err(RemapErrors::CodeCollision {
            column,
            distinct: answers.len(),
        });
    }

    let mut assigned: Vec<(String, Code)> = Vec::new();
    let mut collisions: Vec<Collision> = Vec::new();
    for (idx, answer) in answers.iter().enumerate() {
        let code = free[idx % free.len()];
        if idx >= free.len() {
            let shares_with = answers[idx % free.len()].clone();
            warn!(
                "Column {}: answers {:?} and {:?} both receive code {}",
                column, shares_with, answer, code
            );
            collisions.push(Collision {
                answer: answer.clone(),
                shares_with,
                code,
            });
        }
        assigned.push((answer.clone(), code));
    }
    Ok((assigned, collisions))
}

// Length of the header once the trailing blank cells are dropped. The identity columns
// are always kept.
fn header_width(header: &[Cell]) -> usize {
    let used = header
        .iter()
        .rposition(|c| !c.as_text().is_empty())
        .map(|p| p + 1)
        .unwrap_or(0);
    used.max(IDENTITY_COLUMNS)
}

fn code_cell(code: Option<Code>) -> Cell {
    match code {
        Some(c) => Cell::Text(c.to_string()),
        None => Cell::Empty,
    }
}

/// Rewrites the answers of a whole table into codes and scores each respondent.
///
/// Arguments:
/// * `table` the decoded sheet. The first row is the answer key, the first two columns
/// are identity fields.
/// * `rules` the options for this run
/// * `letters` the source of randomness for the key codes (one draw per keyed column)
///
/// The input is left untouched. Every output row is as wide as the header plus two
/// columns: the combined answer string and the score.
pub fn transform(
    table: &Table,
    rules: &RemapRules,
    letters: &mut dyn LetterSource,
) -> Result<RemapResult, RemapErrors> {
    let (header, respondents) = table.split_first().ok_or(RemapErrors::EmptyTable)?;
    let width = header_width(header);
    info!(
        "Processing {:?} respondents, {:?} question columns",
        respondents.len(),
        width - IDENTITY_COLUMNS
    );

    // First pass: the mapping of every question column.
    let mut mappings: Vec<ColumnMapping> = Vec::new();
    for col in IDENTITY_COLUMNS..width {
        let key: Option<String> = header
            .get(col)
            .map(|c| c.as_text())
            .filter(|s| !s.is_empty());
        let values: Vec<Cell> = respondents
            .iter()
            .map(|r| r.get(col).cloned().unwrap_or(Cell::Empty))
            .collect();
        let mapping = build_column_mapping(col, &values, key.as_deref(), rules, letters)?;
        debug!("transform: mapping: {:?}", mapping);
        mappings.push(mapping);
    }

    let header_codes: Vec<Option<Code>> = mappings.iter().map(|m| m.key_code).collect();

    let mut new_header: Row = normalize_row(header, width, 0);
    for (m, code) in mappings.iter().zip(header_codes.iter()) {
        new_header[m.column] = code_cell(*code);
    }
    if rules.include_key_column {
        let key_string: String = header_codes.iter().flatten().map(|c| c.as_char()).collect();
        new_header.push(Cell::Text(key_string));
    } else {
        new_header.push(Cell::Empty);
    }
    new_header.push(Cell::Text(rules.score_label.clone()));

    // Second pass: the respondents.
    let mut rows: Table = vec![new_header];
    let mut scores: Vec<Score> = Vec::new();
    for (idx, row) in respondents.iter().enumerate() {
        let mut out = normalize_row(row, width, idx + 1);
        let mut codes: Vec<Option<Code>> = Vec::new();
        for m in mappings.iter() {
            let code = match &out[m.column] {
                c if c.as_text().is_empty() => None,
                c => m.code_for(&c.as_text()),
            };
            out[m.column] = code_cell(code);
            codes.push(code);
        }

        let combined: String = codes.iter().flatten().map(|c| c.as_char()).collect();
        let correct = codes
            .iter()
            .zip(header_codes.iter())
            .filter(|(r, h)| r.is_some() && r == h)
            .count();
        let score = Score {
            correct,
            total: combined.len(),
        };
        debug!(
            "transform: row: {:?} combined: {:?} score: {}",
            idx + 1,
            combined,
            score
        );

        out.push(Cell::Text(combined));
        out.push(Cell::Text(score.to_string()));
        scores.push(score);
        rows.push(out);
    }

    Ok(RemapResult {
        table: rows,
        mappings,
        scores,
    })
}

// Pads or cuts a row to the header width.
fn normalize_row(row: &[Cell], width: usize, lineno: usize) -> Row {
    if row.iter().skip(width).any(|c| !c.as_text().is_empty()) {
        warn!(
            "Row {}: cells past the last answer key column are dropped",
            lineno
        );
    }
    (0..width)
        .map(|col| row.get(col).cloned().unwrap_or(Cell::Empty))
        .collect()
}
