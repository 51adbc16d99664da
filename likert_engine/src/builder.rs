pub use crate::config::*;
use crate::dataset::{check_columns, Dataset};

/// A builder for assembling a dataset row by row.
///
/// This is what the loaders use: the header row is given first, then each
/// respondent.
///
/// ```
/// use likert_engine::builder::Builder;
/// use likert_engine::{DemographicColumn, EngineErrors};
///
/// let mut columns: Vec<String> = DemographicColumn::ALL
///     .iter()
///     .map(|c| c.default_header().to_string())
///     .collect();
/// columns.push("Yöneticime güveniyorum".to_string());
///
/// let mut builder = Builder::default().columns(&columns)?;
/// builder.add_row_simple(&["Kadın", "25-34", "1-3 yıl", "Uzman", "IT", "Katılıyorum"])?;
/// let dataset = builder.build()?;
/// assert_eq!(dataset.questions().len(), 1);
///
/// # Ok::<(), EngineErrors>(())
/// ```
#[derive(Debug, Clone)]
pub struct Builder {
    pub(crate) _scale: LikertScale,
    pub(crate) _headers: DemographicHeaders,
    pub(crate) _columns: Vec<String>,
    pub(crate) _rows: Vec<Vec<Option<String>>>,
}

impl Builder {
    pub fn new(scale: &LikertScale) -> Builder {
        Builder {
            _scale: scale.clone(),
            _headers: DemographicHeaders::default(),
            _columns: Vec::new(),
            _rows: Vec::new(),
        }
    }

    /// Overrides the source headers of the demographic columns.
    pub fn headers(self, headers: &DemographicHeaders) -> Builder {
        Builder {
            _headers: headers.clone(),
            ..self
        }
    }

    /// Sets the header row. All the demographic headers must be present.
    pub fn columns(self, columns: &[String]) -> Result<Builder, EngineErrors> {
        check_columns(&self._headers, columns)?;
        Ok(Builder {
            _columns: columns.to_vec(),
            _rows: Vec::new(),
            ..self
        })
    }

    /// Adds a respondent. Empty strings are missing values.
    pub fn add_row_simple(&mut self, cells: &[&str]) -> Result<(), EngineErrors> {
        let row: Vec<Option<String>> = cells
            .iter()
            .map(|s| {
                if s.is_empty() {
                    None
                } else {
                    Some(s.to_string())
                }
            })
            .collect();
        self.add_row(&row)
    }

    /// Adds a respondent, with one cell per column.
    pub fn add_row(&mut self, cells: &[Option<String>]) -> Result<(), EngineErrors> {
        if cells.len() != self._columns.len() {
            return Err(EngineErrors::RowWidth {
                row: self._rows.len(),
                expected: self._columns.len(),
                found: cells.len(),
            });
        }
        self._rows.push(cells.to_vec());
        Ok(())
    }

    pub fn num_rows(&self) -> usize {
        self._rows.len()
    }

    pub fn build(self) -> Result<Dataset, EngineErrors> {
        Dataset::from_table(&self._scale, &self._headers, &self._columns, &self._rows)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Builder::new(&LikertScale::default())
    }
}
