use log::debug;

use crate::config::*;
use crate::filter::FilteredView;

/// Counts per position in the scale. Values outside of the scale are dropped.
pub(crate) fn tally(view: &FilteredView, question_idxs: &[usize], scale: &LikertScale) -> Vec<u64> {
    let mut counts: Vec<u64> = vec![0; scale.len()];
    for r in view.respondents() {
        for q_idx in question_idxs.iter() {
            if let Some(pos) = r.answers()[*q_idx].as_deref().and_then(|v| scale.position(v)) {
                counts[pos] += 1;
            }
        }
    }
    counts
}

/// `part / total` in hundredths of a percent, rounded half up.
///
/// Integer arithmetic keeps the ties at .005 exact.
pub(crate) fn hundredths(part: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    let scaled = part as u128 * 10_000;
    let total = total as u128;
    let q = scaled / total;
    let r = scaled % total;
    if 2 * r >= total {
        (q + 1) as u64
    } else {
        q as u64
    }
}

/// Percentage of `part` in `total` with 2 decimals, 0 when the total is 0.
pub fn percentage(part: u64, total: u64) -> f64 {
    hundredths(part, total) as f64 / 100.0
}

fn to_distribution(counts: &[u64], scale: &LikertScale) -> DistributionResult {
    let total_valid: u64 = counts.iter().sum();
    let rows = scale
        .labels()
        .iter()
        .zip(counts.iter())
        .map(|(label, count)| CategoryShare {
            answer: label.clone(),
            count: *count,
            percentage: percentage(*count, total_valid),
        })
        .collect();
    DistributionResult { rows, total_valid }
}

/// The distribution of the answers of one question.
///
/// Missing answers and answers outside of the scale are not part of the
/// total.
pub fn distribution_for_question(
    view: &FilteredView,
    question: &str,
) -> Result<DistributionResult, EngineErrors> {
    let dataset = view.dataset();
    let q_idx = dataset.question_index(question)?;
    let counts = tally(view, &[q_idx], dataset.scale());
    debug!(
        "distribution_for_question: {:?} over {} respondents: {:?}",
        question,
        view.len(),
        counts
    );
    Ok(to_distribution(&counts, dataset.scale()))
}

/// The distribution of all the answers to the given questions, pooled
/// together.
///
/// Every valid answer weighs the same. This is not the average of the
/// per-question percentages when the questions have different numbers of
/// valid answers.
pub fn distribution_for_all_questions<S: AsRef<str>>(
    view: &FilteredView,
    questions: &[S],
) -> Result<DistributionResult, EngineErrors> {
    let dataset = view.dataset();
    let q_idxs = dataset.question_indexes(questions)?;
    let counts = tally(view, &q_idxs, dataset.scale());
    debug!(
        "distribution_for_all_questions: {} questions over {} respondents: {:?}",
        q_idxs.len(),
        view.len(),
        counts
    );
    Ok(to_distribution(&counts, dataset.scale()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;
    use crate::filter::*;
    use crate::Dataset;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    const DEMO: [&str; 5] = ["F", "25-34", "1-3", "Uzman", "IT"];

    fn columns(questions: &[&str]) -> Vec<String> {
        let mut cols: Vec<String> = DemographicColumn::ALL
            .iter()
            .map(|c| c.default_header().to_string())
            .collect();
        cols.extend(questions.iter().map(|q| q.to_string()));
        cols
    }

    /// One row per answer of the single question `Q1`.
    fn single_question(answers: &[Option<&str>]) -> Dataset {
        let mut builder = Builder::default().columns(&columns(&["Q1"])).unwrap();
        for a in answers.iter() {
            let mut row: Vec<Option<String>> = DEMO.iter().map(|s| Some(s.to_string())).collect();
            row.push(a.map(String::from));
            builder.add_row(&row).unwrap();
        }
        builder.build().unwrap()
    }

    fn example() -> Dataset {
        single_question(&[
            Some("Katılıyorum"),
            Some("Katılıyorum"),
            Some("Kararsızım"),
            Some("Katılmıyorum"),
            Some("Kesinlikle Katılmıyorum"),
            Some("Katılıyorum"),
            Some("Kesinlikle Katılıyorum"),
            None,
            Some("Katılıyorum"),
            Some("Kararsızım"),
        ])
    }

    /// Three questions with different numbers of valid answers.
    fn uneven() -> Dataset {
        let mut builder = Builder::default()
            .columns(&columns(&["Q1", "Q2", "Q3"]))
            .unwrap();
        let rows = [
            ["Katılıyorum", "Katılmıyorum", ""],
            ["Katılıyorum", "", ""],
            ["Kararsızım", "Katılmıyorum", "bilmiyorum"],
            ["Kesinlikle Katılıyorum", "", "Kesinlikle Katılmıyorum"],
        ];
        for answers in rows.iter() {
            let mut row: Vec<&str> = DEMO.to_vec();
            row.extend(answers.iter());
            builder.add_row_simple(&row).unwrap();
        }
        builder.build().unwrap()
    }

    #[test]
    fn single_question_example() {
        init();
        let ds = example();
        let view = FilteredView::all(&ds);
        let d = distribution_for_question(&view, "Q1").unwrap();
        assert_eq!(d.total_valid, 9);
        assert!(!d.is_no_data());
        let counts: Vec<u64> = d.rows.iter().map(|r| r.count).collect();
        assert_eq!(counts, vec![1, 4, 2, 1, 1]);
        let percentages: Vec<f64> = d.rows.iter().map(|r| r.percentage).collect();
        assert_eq!(percentages, vec![11.11, 44.44, 22.22, 11.11, 11.11]);
        let answers: Vec<&str> = d.rows.iter().map(|r| r.answer.as_str()).collect();
        assert_eq!(answers, AGREEMENT_LABELS.to_vec());
    }

    #[test]
    fn labels_use_one_decimal() {
        let ds = example();
        let d = distribution_for_question(&FilteredView::all(&ds), "Q1").unwrap();
        assert_eq!(d.rows[1].percentage, 44.44);
        assert_eq!(d.rows[1].label(), "4 (44.4%)");
        assert_eq!(d.rows[2].label(), "2 (22.2%)");
    }

    #[test]
    fn percentages_sum_to_100() {
        for ds in [example(), uneven()].iter() {
            let view = FilteredView::all(ds);
            for q in ds.questions().iter() {
                let d = distribution_for_question(&view, q).unwrap();
                if d.total_valid > 0 {
                    let sum: f64 = d.rows.iter().map(|r| r.percentage).sum();
                    assert!((sum - 100.0).abs() <= 0.01 + 1e-9, "{} sums to {}", q, sum);
                }
            }
        }
    }

    #[test]
    fn no_valid_answer_is_no_data() {
        let ds = single_question(&[None, Some("belki"), Some("")]);
        let d = distribution_for_question(&FilteredView::all(&ds), "Q1").unwrap();
        assert!(d.is_no_data());
        assert_eq!(d.rows.len(), 5);
        assert!(d.rows.iter().all(|r| r.count == 0 && r.percentage == 0.0));
    }

    #[test]
    fn labels_are_matched_exactly() {
        let ds = single_question(&[Some("katılıyorum"), Some(" Katılıyorum"), Some("Katılıyorum")]);
        let d = distribution_for_question(&FilteredView::all(&ds), "Q1").unwrap();
        assert_eq!(d.total_valid, 1);
        assert_eq!(d.rows[1].percentage, 100.0);
    }

    #[test]
    fn unknown_question_is_rejected() {
        let ds = example();
        let view = FilteredView::all(&ds);
        assert_eq!(
            distribution_for_question(&view, "Q9"),
            Err(EngineErrors::UnknownQuestion("Q9".to_string()))
        );
        // Demographic columns are not questions.
        let gender = DemographicColumn::Gender.default_header();
        assert_eq!(
            distribution_for_all_questions(&view, &["Q1", gender]),
            Err(EngineErrors::UnknownQuestion(gender.to_string()))
        );
    }

    /// Checks the pooled counts against the per-question counts and against a
    /// recount of the raw cells of the view.
    fn pooled_counts(view: &FilteredView) -> Vec<u64> {
        let ds = view.dataset();
        let pooled = distribution_for_all_questions(view, ds.questions()).unwrap();

        let mut summed: Vec<u64> = vec![0; 5];
        for q in ds.questions().iter() {
            let d = distribution_for_question(view, q).unwrap();
            for (idx, r) in d.rows.iter().enumerate() {
                summed[idx] += r.count;
            }
        }
        let pooled_counts: Vec<u64> = pooled.rows.iter().map(|r| r.count).collect();
        assert_eq!(pooled_counts, summed);

        let scale = ds.scale();
        let mut direct: Vec<u64> = vec![0; 5];
        for r in view.respondents() {
            for a in r.answers().iter().flatten() {
                if let Some(pos) = scale.position(a) {
                    direct[pos] += 1;
                }
            }
        }
        assert_eq!(pooled_counts, direct);
        assert_eq!(pooled.total_valid, direct.iter().sum::<u64>());
        pooled_counts
    }

    #[test]
    fn pooled_counts_match_per_question_counts() {
        init();
        let ds = uneven();
        assert_eq!(pooled_counts(&FilteredView::all(&ds)), vec![1, 2, 1, 2, 1]);
    }

    #[test]
    fn pooled_counts_match_on_filtered_views() {
        let mut builder = Builder::default()
            .columns(&columns(&["Q1", "Q2"]))
            .unwrap();
        let rows: [[&str; 7]; 4] = [
            ["F", "25-34", "1-3", "Uzman", "IT", "Katılıyorum", "Kararsızım"],
            ["E", "25-34", "1-3", "Uzman", "IK", "Katılmıyorum", ""],
            ["E", "35-44", "1-3", "Uzman", "IT", "Katılmıyorum", "Kesinlikle Katılıyorum"],
            ["E", "35-44", "0-1", "Uzman", "IT", "yok", "Katılmıyorum"],
        ];
        for r in rows.iter() {
            builder.add_row_simple(r).unwrap();
        }
        let ds = builder.build().unwrap();
        assert_eq!(pooled_counts(&FilteredView::all(&ds)), vec![1, 1, 1, 3, 0]);

        let mut sel = FilterSelection::new();
        sel.select_column(DemographicColumn::Department, &["IT".to_string()]);
        let view = apply_filters(&ds, &sel).view().unwrap();
        assert_eq!(view.rows(), &[0, 2, 3]);
        assert_eq!(pooled_counts(&view), vec![1, 1, 1, 2, 0]);

        sel.select_column(DemographicColumn::Gender, &["E".to_string()]);
        let view = apply_filters(&ds, &sel).view().unwrap();
        assert_eq!(pooled_counts(&view), vec![1, 0, 0, 2, 0]);
    }

    #[test]
    fn pooled_is_not_an_average_of_percentages() {
        let ds = uneven();
        let view = FilteredView::all(&ds);
        let pooled = distribution_for_all_questions(&view, ds.questions()).unwrap();
        assert_eq!(pooled.total_valid, 7);
        // 2 "Katılıyorum" out of 7 valid answers.
        assert_eq!(pooled.rows[1].count, 2);
        assert_eq!(pooled.rows[1].percentage, 28.57);

        // Q1: 2/4, Q2: 0/2, Q3: 0/1
        let mean: f64 = ds
            .questions()
            .iter()
            .map(|q| distribution_for_question(&view, q).unwrap().rows[1].percentage)
            .sum::<f64>()
            / 3.0;
        assert!((mean - 16.67).abs() < 0.01);
        assert!((pooled.rows[1].percentage - mean).abs() > 10.0);
    }

    #[test]
    fn no_question_is_no_data() {
        let ds = uneven();
        let view = FilteredView::all(&ds);
        let empty: Vec<String> = vec![];
        let d = distribution_for_all_questions(&view, &empty).unwrap();
        assert!(d.is_no_data());
    }

    #[test]
    fn filtered_distribution() {
        let mut builder = Builder::default().columns(&columns(&["Q1"])).unwrap();
        builder
            .add_row_simple(&["F", "25-34", "1-3", "Uzman", "IT", "Katılıyorum"])
            .unwrap();
        builder
            .add_row_simple(&["E", "25-34", "1-3", "Uzman", "IK", "Katılmıyorum"])
            .unwrap();
        builder
            .add_row_simple(&["E", "35-44", "1-3", "Uzman", "IT", "Katılmıyorum"])
            .unwrap();
        let ds = builder.build().unwrap();
        let mut sel = FilterSelection::new();
        sel.select_column(DemographicColumn::Gender, &["E".to_string()]);
        let view = apply_filters(&ds, &sel).view().unwrap();
        let d = distribution_for_question(&view, "Q1").unwrap();
        assert_eq!(d.total_valid, 2);
        assert_eq!(d.rows[3].count, 2);
        assert_eq!(d.rows[3].percentage, 100.0);
    }

    #[test]
    fn rounding_is_half_up() {
        // 1/8 = 12.5%, 1/16 = 6.25%, 1/32 = 3.125% -> 3.13
        assert_eq!(percentage(1, 8), 12.5);
        assert_eq!(percentage(1, 16), 6.25);
        assert_eq!(percentage(1, 32), 3.13);
        assert_eq!(percentage(3, 32), 9.38);
        assert_eq!(percentage(2, 3), 66.67);
        assert_eq!(percentage(0, 0), 0.0);
    }

    #[test]
    fn computations_are_repeatable() {
        let ds = uneven();
        let view = FilteredView::all(&ds);
        let a = distribution_for_all_questions(&view, ds.questions()).unwrap();
        let b = distribution_for_all_questions(&view, ds.questions()).unwrap();
        assert_eq!(a, b);
        for (x, y) in a.rows.iter().zip(b.rows.iter()) {
            assert_eq!(x.percentage.to_bits(), y.percentage.to_bits());
        }
    }
}
