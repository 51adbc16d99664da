use log::debug;
use std::collections::HashSet;

use crate::config::*;

/// One respondent of the survey.
///
/// Cells are `None` when the source had no value or an empty string.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Respondent {
    pub(crate) demographics: Vec<Option<String>>,
    pub(crate) answers: Vec<Option<String>>,
}

impl Respondent {
    pub fn demographic(&self, column: DemographicColumn) -> Option<&str> {
        self.demographics[column.index()].as_deref()
    }

    pub fn answers(&self) -> &[Option<String>] {
        &self.answers
    }
}

/// The survey table, after loading.
///
/// The columns are split between the configured demographic columns and the
/// questions, which are all the other columns in source order. A dataset is
/// never modified after construction.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Dataset {
    scale: LikertScale,
    headers: DemographicHeaders,
    columns: Vec<String>,
    questions: Vec<String>,
    respondents: Vec<Respondent>,
}

impl Dataset {
    /// Builds a dataset from a table of raw cells.
    ///
    /// Every configured demographic header must be present in `columns`.
    pub fn from_table(
        scale: &LikertScale,
        headers: &DemographicHeaders,
        columns: &[String],
        rows: &[Vec<Option<String>>],
    ) -> Result<Dataset, EngineErrors> {
        check_columns(headers, columns)?;

        let demographic_positions: Vec<usize> = DemographicColumn::ALL
            .iter()
            .filter_map(|c| columns.iter().position(|h| h == headers.header(*c)))
            .collect();
        let question_positions: Vec<usize> = columns
            .iter()
            .enumerate()
            .filter_map(|(idx, h)| {
                if headers.is_demographic(h) {
                    None
                } else {
                    Some(idx)
                }
            })
            .collect();
        let questions: Vec<String> = question_positions
            .iter()
            .map(|idx| columns[*idx].clone())
            .collect();
        debug!(
            "from_table: {} columns, {} questions: {:?}",
            columns.len(),
            questions.len(),
            questions
        );

        let mut respondents: Vec<Respondent> = Vec::with_capacity(rows.len());
        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(EngineErrors::RowWidth {
                    row: row_idx,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
            let pick = |idx: &usize| -> Option<String> {
                match &row[*idx] {
                    Some(s) if s.is_empty() => None,
                    x => x.clone(),
                }
            };
            respondents.push(Respondent {
                demographics: demographic_positions.iter().map(pick).collect(),
                answers: question_positions.iter().map(pick).collect(),
            });
        }

        Ok(Dataset {
            scale: scale.clone(),
            headers: headers.clone(),
            columns: columns.to_vec(),
            questions,
            respondents,
        })
    }

    pub fn scale(&self) -> &LikertScale {
        &self.scale
    }

    pub fn headers(&self) -> &DemographicHeaders {
        &self.headers
    }

    /// All the column names, in source order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The question columns, in source order.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn has_questions(&self) -> bool {
        !self.questions.is_empty()
    }

    pub fn respondents(&self) -> &[Respondent] {
        &self.respondents
    }

    pub fn len(&self) -> usize {
        self.respondents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.respondents.is_empty()
    }

    /// The position of a question, or an error if this is not a question of
    /// the dataset.
    pub fn question_index(&self, question: &str) -> Result<usize, EngineErrors> {
        self.questions
            .iter()
            .position(|q| q == question)
            .ok_or_else(|| EngineErrors::UnknownQuestion(question.to_string()))
    }

    pub(crate) fn question_indexes<S: AsRef<str>>(
        &self,
        questions: &[S],
    ) -> Result<Vec<usize>, EngineErrors> {
        questions
            .iter()
            .map(|q| self.question_index(q.as_ref()))
            .collect()
    }
}

pub(crate) fn check_columns(
    headers: &DemographicHeaders,
    columns: &[String],
) -> Result<(), EngineErrors> {
    headers.validate()?;
    let mut seen: HashSet<&str> = HashSet::new();
    for c in columns.iter() {
        if !seen.insert(c.as_str()) {
            return Err(EngineErrors::DuplicateColumn(c.clone()));
        }
    }
    let missing: Vec<String> = DemographicColumn::ALL
        .iter()
        .map(|c| headers.header(*c))
        .filter(|h| !seen.contains(h))
        .map(|h| h.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(EngineErrors::MissingDemographicColumns {
            missing,
            available: columns.to_vec(),
        });
    }
    Ok(())
}
