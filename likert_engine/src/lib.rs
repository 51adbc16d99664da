//! Filtered distributions and negativity rankings for Likert-scale surveys.
//!
//! A [`Dataset`] holds the respondents of a survey: a few demographic
//! columns used for filtering, and any number of question columns answered
//! on a fixed [`LikertScale`]. The engine then offers three independent
//! computations on a [`FilteredView`] of this dataset:
//! - the distribution of the answers to one question,
//! - the pooled distribution of the answers to many questions,
//! - the ranking of the questions by share of negative answers.
//!
//! ```
//! use likert_engine::builder::Builder;
//! use likert_engine::*;
//!
//! let mut columns: Vec<String> = DemographicColumn::ALL
//!     .iter()
//!     .map(|c| c.default_header().to_string())
//!     .collect();
//! columns.push("İş yükümü dengeli buluyorum".to_string());
//!
//! let mut builder = Builder::default().columns(&columns)?;
//! builder.add_row_simple(&["Kadın", "25-34", "1-3 yıl", "Uzman", "IT", "Katılmıyorum"])?;
//! builder.add_row_simple(&["Erkek", "35-44", "3-5 yıl", "Uzman", "IK", "Katılıyorum"])?;
//! let dataset = builder.build()?;
//!
//! let mut selection = FilterSelection::new();
//! selection.select(dataset.headers(), "Departman", &["IT".to_string()])?;
//!
//! if let FilterOutcome::Matched(view) = apply_filters(&dataset, &selection) {
//!     let ranks = rank_negativity(&view, dataset.questions())?;
//!     assert_eq!(ranks[0].negative_percentage, 100.0);
//! }
//! # Ok::<(), EngineErrors>(())
//! ```
//!
//! All the computations are pure functions of their inputs.

mod config;
mod dataset;
mod distribution;
mod filter;
mod ranking;

pub mod builder;
pub mod manual;

pub use crate::config::*;
pub use crate::dataset::{Dataset, Respondent};
pub use crate::distribution::{
    distribution_for_all_questions, distribution_for_question, percentage,
};
pub use crate::filter::{
    apply_filters, distinct_values, FilterOutcome, FilterSelection, FilteredView,
};
pub use crate::ranking::rank_negativity;
