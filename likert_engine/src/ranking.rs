use log::debug;
use std::cmp::Reverse;

use crate::config::*;
use crate::distribution::{hundredths, tally};
use crate::filter::FilteredView;

/// Ranks the questions by their share of negative answers, highest first.
///
/// Only the answers in the scale are counted. A question without any valid
/// answer has a negative percentage of 0. Questions with the same (rounded)
/// percentage keep the order in which they were given.
pub fn rank_negativity<S: AsRef<str>>(
    view: &FilteredView,
    questions: &[S],
) -> Result<Vec<NegativityRank>, EngineErrors> {
    let dataset = view.dataset();
    let scale = dataset.scale();
    let q_idxs = dataset.question_indexes(questions)?;

    let mut ranks: Vec<(u64, NegativityRank)> = Vec::with_capacity(q_idxs.len());
    for (q_name, q_idx) in questions.iter().zip(q_idxs.iter()) {
        let counts = tally(view, &[*q_idx], scale);
        let total_valid: u64 = counts.iter().sum();
        let negative: u64 = counts
            .iter()
            .enumerate()
            .filter(|(pos, _)| scale.is_negative_position(*pos))
            .map(|(_, c)| *c)
            .sum();
        let h = hundredths(negative, total_valid);
        debug!(
            "rank_negativity: {:?}: {} negative out of {}",
            q_name.as_ref(),
            negative,
            total_valid
        );
        ranks.push((
            h,
            NegativityRank {
                question: q_name.as_ref().to_string(),
                total_valid,
                negative,
                negative_percentage: h as f64 / 100.0,
            },
        ));
    }

    // sort_by_key is stable.
    ranks.sort_by_key(|(h, _)| Reverse(*h));
    Ok(ranks.into_iter().map(|(_, r)| r).collect())
}
