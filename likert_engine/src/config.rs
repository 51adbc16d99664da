// ********* Category model ***********

use std::error::Error;
use std::fmt::Display;

/// The agreement labels of the survey, from the strongest agreement to the
/// strongest disagreement.
pub const AGREEMENT_LABELS: [&str; 5] = [
    "Kesinlikle Katılıyorum",
    "Katılıyorum",
    "Kararsızım",
    "Katılmıyorum",
    "Kesinlikle Katılmıyorum",
];

/// Number of labels at the end of the scale that count as a negative answer.
pub const NEGATIVE_SUFFIX_LEN: usize = 3;

/// An ordered set of answer categories.
///
/// The order controls the order of the rows in every distribution. The last
/// `negative_count` labels form the negative partition of the scale.
/// Membership is an exact string match.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LikertScale {
    labels: Vec<String>,
    negative_count: usize,
}

impl LikertScale {
    /// Builds a custom scale.
    pub fn new(labels: &[String], negative_count: usize) -> Result<LikertScale, EngineErrors> {
        if labels.is_empty() {
            return Err(EngineErrors::InvalidScale(
                "a scale needs at least one label".to_string(),
            ));
        }
        if negative_count > labels.len() {
            return Err(EngineErrors::InvalidScale(format!(
                "{} negative labels requested but the scale only has {} labels",
                negative_count,
                labels.len()
            )));
        }
        for (idx, l) in labels.iter().enumerate() {
            if labels[..idx].contains(l) {
                return Err(EngineErrors::InvalidScale(format!(
                    "label {:?} appears more than once",
                    l
                )));
            }
        }
        Ok(LikertScale {
            labels: labels.to_vec(),
            negative_count,
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The position of the label in the scale, if it is a label of the scale.
    pub fn position(&self, value: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == value)
    }

    pub fn is_valid(&self, value: &str) -> bool {
        self.position(value).is_some()
    }

    /// False for anything outside of the scale, missing values included.
    pub fn is_negative(&self, value: &str) -> bool {
        matches!(self.position(value), Some(idx) if self.is_negative_position(idx))
    }

    pub(crate) fn is_negative_position(&self, idx: usize) -> bool {
        idx >= self.labels.len() - self.negative_count
    }

    pub fn negative_labels(&self) -> &[String] {
        &self.labels[self.labels.len() - self.negative_count..]
    }
}

impl Default for LikertScale {
    fn default() -> Self {
        LikertScale {
            labels: AGREEMENT_LABELS.iter().map(|s| s.to_string()).collect(),
            negative_count: NEGATIVE_SUFFIX_LEN,
        }
    }
}

// ********* Demographic columns ***********

/// The respondent attributes that are only used for filtering.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum DemographicColumn {
    Gender,
    AgeBracket,
    Tenure,
    PositionGroup,
    Department,
}

impl DemographicColumn {
    /// All the columns, in display order.
    pub const ALL: [DemographicColumn; 5] = [
        DemographicColumn::Gender,
        DemographicColumn::AgeBracket,
        DemographicColumn::Tenure,
        DemographicColumn::PositionGroup,
        DemographicColumn::Department,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// The key used in configuration files.
    pub fn key(self) -> &'static str {
        match self {
            DemographicColumn::Gender => "gender",
            DemographicColumn::AgeBracket => "age",
            DemographicColumn::Tenure => "tenure",
            DemographicColumn::PositionGroup => "position",
            DemographicColumn::Department => "department",
        }
    }

    /// The short name shown next to the filter widgets.
    pub fn label(self) -> &'static str {
        match self {
            DemographicColumn::Gender => "Cinsiyet",
            DemographicColumn::AgeBracket => "Yaş Aralığı",
            DemographicColumn::Tenure => "Çalışma Süresi",
            DemographicColumn::PositionGroup => "Pozisyon",
            DemographicColumn::Department => "Departman",
        }
    }

    /// The header of the column in the survey export.
    pub fn default_header(self) -> &'static str {
        match self {
            DemographicColumn::Gender => "1.Cinsiyetiniz nedir?",
            DemographicColumn::AgeBracket => "2. Yaş aralığınız nedir?",
            DemographicColumn::Tenure => "3.Şirkette ne kadar süredir çalışıyorsunuz?",
            DemographicColumn::PositionGroup => "Pozisyon grubunuz nedir?",
            DemographicColumn::Department => "Departmanınız nedir?",
        }
    }
}

/// The verbatim source headers of the demographic columns.
///
/// Header matching is exact, punctuation and diacritics included.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DemographicHeaders {
    headers: Vec<String>,
}

impl DemographicHeaders {
    pub fn header(&self, column: DemographicColumn) -> &str {
        &self.headers[column.index()]
    }

    pub fn with_header(mut self, column: DemographicColumn, header: &str) -> DemographicHeaders {
        self.headers[column.index()] = header.to_string();
        self
    }

    pub fn is_demographic(&self, header: &str) -> bool {
        self.headers.iter().any(|h| h == header)
    }

    /// Resolves a demographic column from its source header, its
    /// configuration key or its label. Headers are looked up first.
    pub fn resolve(&self, name: &str) -> Result<DemographicColumn, EngineErrors> {
        DemographicColumn::ALL
            .iter()
            .find(|c| self.header(**c) == name)
            .or_else(|| {
                DemographicColumn::ALL
                    .iter()
                    .find(|c| c.key() == name || c.label() == name)
            })
            .cloned()
            .ok_or_else(|| EngineErrors::UnknownDemographic(name.to_string()))
    }

    /// Checks that every header names a single column: no two columns share
    /// a header, and no header is the key or the label of another column.
    pub fn validate(&self) -> Result<(), EngineErrors> {
        for column in DemographicColumn::ALL.iter() {
            let header = self.header(*column);
            let clash = DemographicColumn::ALL.iter().any(|other| {
                other != column
                    && (self.header(*other) == header
                        || other.key() == header
                        || other.label() == header)
            });
            if clash {
                return Err(EngineErrors::DemographicHeaderConflict(
                    header.to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Default for DemographicHeaders {
    fn default() -> Self {
        DemographicHeaders {
            headers: DemographicColumn::ALL
                .iter()
                .map(|c| c.default_header().to_string())
                .collect(),
        }
    }
}

// ******** Output data structures *********

/// One row of a distribution.
#[derive(PartialEq, Debug, Clone)]
pub struct CategoryShare {
    pub answer: String,
    pub count: u64,
    /// Percentage of the valid answers, rounded to 2 decimals.
    pub percentage: f64,
}

impl CategoryShare {
    /// Display label such as `4 (44.4%)`.
    pub fn label(&self) -> String {
        format!("{} ({:.1}%)", self.count, self.percentage)
    }
}

/// The answers of one question (or of several pooled questions) tallied in
/// scale order.
#[derive(PartialEq, Debug, Clone)]
pub struct DistributionResult {
    pub rows: Vec<CategoryShare>,
    /// Number of answers that belong to the scale.
    pub total_valid: u64,
}

impl DistributionResult {
    /// No valid answer was found: all the rows are zero.
    pub fn is_no_data(&self) -> bool {
        self.total_valid == 0
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct NegativityRank {
    pub question: String,
    pub total_valid: u64,
    pub negative: u64,
    pub negative_percentage: f64,
}

/// Errors that prevent a computation from completing.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum EngineErrors {
    /// Some configured demographic headers are not in the dataset.
    MissingDemographicColumns {
        missing: Vec<String>,
        available: Vec<String>,
    },
    DuplicateColumn(String),
    /// A demographic header that does not designate a single column.
    DemographicHeaderConflict(String),
    /// A row does not have one cell per column.
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    UnknownQuestion(String),
    UnknownDemographic(String),
    InvalidScale(String),
}

impl Error for EngineErrors {}

impl Display for EngineErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineErrors::MissingDemographicColumns { missing, available } => write!(
                f,
                "demographic columns not found: {:?} (available columns: {:?})",
                missing, available
            ),
            EngineErrors::DuplicateColumn(name) => {
                write!(f, "column {:?} appears more than once", name)
            }
            EngineErrors::DemographicHeaderConflict(header) => write!(
                f,
                "demographic header {:?} is used by more than one column",
                header
            ),
            EngineErrors::RowWidth {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has {} cells, expected {}",
                row, found, expected
            ),
            EngineErrors::UnknownQuestion(name) => write!(f, "unknown question: {:?}", name),
            EngineErrors::UnknownDemographic(name) => {
                write!(f, "unknown demographic column: {:?}", name)
            }
            EngineErrors::InvalidScale(reason) => write!(f, "invalid scale: {}", reason),
        }
    }
}
