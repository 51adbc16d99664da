use log::{debug, info, warn};

use likert_engine::builder::Builder;
use likert_engine::*;
use snafu::{prelude::*, Snafu};

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::survey::config_reader::*;
use crate::survey::io_common::{table_to_dataset, RawTable};

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_excel;

/// The file read when neither an input nor a configuration is given.
const DEFAULT_INPUT: &str = "anket.xlsx";

#[derive(Debug, Snafu)]
pub enum SurveyError {
    #[snafu(display("Error opening Excel file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Worksheet {name:?} not found in {path}"))]
    MissingWorksheet { path: String, name: String },
    #[snafu(display(
        "{path} has several worksheets ({names:?}), a worksheet name must be provided"
    ))]
    AmbiguousWorksheet { path: String, names: Vec<String> },
    #[snafu(display("No header row found in {path}"))]
    EmptySheet { path: String },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading CSV line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Filter {arg:?} should have the form KEY=VALUE"))]
    FilterSyntax { arg: String },
    #[snafu(display("Unknown demographic column key {key:?} in the configuration"))]
    UnknownDemographicKey { key: String },
    #[snafu(display("Unknown input type {provider:?} (expected xlsx or csv)"))]
    UnknownProvider { provider: String },
    #[snafu(display("Cannot find the directory of {path}"))]
    MissingParentDir { path: String },
    #[snafu(display("{source}"))]
    Engine { source: EngineErrors },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type SurveyResult<T> = Result<T, SurveyError>;

/// What to compute on a dataset.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ReportRequest {
    pub survey_name: String,
    pub selection: FilterSelection,
    /// The question to detail. The first question is used if not provided.
    pub question: Option<String>,
    /// Also list the columns of the dataset.
    pub show_columns: bool,
}

fn distribution_to_json(d: &DistributionResult) -> JSValue {
    let rows: Vec<JSValue> = d
        .rows
        .iter()
        .map(|r| {
            json!({
                "answer": r.answer,
                "count": r.count,
                "percentage": r.percentage,
                "label": r.label()
            })
        })
        .collect();
    let status = if d.is_no_data() { "noData" } else { "ok" };
    json!({"status": status, "totalValid": d.total_valid, "rows": rows})
}

fn ranks_to_json(ranks: &[NegativityRank]) -> Vec<JSValue> {
    ranks
        .iter()
        .map(|r| {
            json!({
                "question": r.question,
                "totalValid": r.total_valid,
                "negative": r.negative,
                "negativePercentage": r.negative_percentage
            })
        })
        .collect()
}

fn filters_to_json(selection: &FilterSelection) -> JSMap<String, JSValue> {
    let mut filters: JSMap<String, JSValue> = JSMap::new();
    for (column, values) in selection.active() {
        filters.insert(column.label().to_string(), json!(values));
    }
    filters
}

fn filter_choices_to_json(dataset: &Dataset) -> JSMap<String, JSValue> {
    let mut choices: JSMap<String, JSValue> = JSMap::new();
    for column in DemographicColumn::ALL.iter() {
        choices.insert(
            column.label().to_string(),
            json!(distinct_values(dataset, *column)),
        );
    }
    choices
}

fn columns_to_json(dataset: &Dataset) -> JSValue {
    let demographic: Vec<&str> = DemographicColumn::ALL
        .iter()
        .map(|c| dataset.headers().header(*c))
        .collect();
    json!({
        "all": dataset.columns(),
        "demographic": demographic,
        "questions": dataset.questions()
    })
}

fn log_distribution(name: &str, d: &DistributionResult) {
    if d.is_no_data() {
        warn!("{}: no valid answer", name);
        return;
    }
    info!("{} ({} valid answers)", name, d.total_valid);
    for r in d.rows.iter() {
        info!("    {:>14} {}", r.label(), r.answer);
    }
}

/// Runs all the computations of the report and assembles the summary.
pub fn build_summary_js(dataset: &Dataset, request: &ReportRequest) -> SurveyResult<JSValue> {
    let mut summary: JSMap<String, JSValue> = JSMap::new();
    summary.insert(
        "config".to_string(),
        json!({
            "survey": request.survey_name,
            "filters": filters_to_json(&request.selection)
        }),
    );
    summary.insert(
        "filterChoices".to_string(),
        JSValue::Object(filter_choices_to_json(dataset)),
    );
    if request.show_columns {
        summary.insert("columns".to_string(), columns_to_json(dataset));
    }

    if !dataset.has_questions() {
        warn!("No question column found: all the columns are demographic columns");
        summary.insert("status".to_string(), json!("noQuestions"));
        return Ok(JSValue::Object(summary));
    }

    let question: String = match &request.question {
        Some(q) => q.clone(),
        None => dataset.questions()[0].clone(),
    };
    // Reject a bad question even when no respondent is left.
    dataset.question_index(&question).context(EngineSnafu {})?;

    let view = match apply_filters(dataset, &request.selection) {
        FilterOutcome::Matched(view) => view,
        FilterOutcome::NoMatch => {
            warn!("No respondent matches the selected filters");
            summary.insert("status".to_string(), json!("noMatchingRespondents"));
            summary.insert("participants".to_string(), json!(0));
            return Ok(JSValue::Object(summary));
        }
    };
    info!(
        "{} of {} respondents match the filters",
        view.len(),
        dataset.len()
    );

    let single = distribution_for_question(&view, &question).context(EngineSnafu {})?;
    log_distribution(&question, &single);
    let overall =
        distribution_for_all_questions(&view, dataset.questions()).context(EngineSnafu {})?;
    log_distribution("All questions", &overall);
    let ranks = rank_negativity(&view, dataset.questions()).context(EngineSnafu {})?;
    for (idx, r) in ranks.iter().enumerate() {
        debug!(
            "build_summary_js: rank {}: {:?} {}% negative ({} of {})",
            idx + 1,
            r.question,
            r.negative_percentage,
            r.negative,
            r.total_valid
        );
    }

    summary.insert("status".to_string(), json!("ok"));
    summary.insert("participants".to_string(), json!(view.len()));
    summary.insert(
        "question".to_string(),
        json!({"name": question, "distribution": distribution_to_json(&single)}),
    );
    summary.insert("overall".to_string(), distribution_to_json(&overall));
    summary.insert(
        "negativityRanking".to_string(),
        JSValue::Array(ranks_to_json(&ranks)),
    );
    Ok(JSValue::Object(summary))
}

/// Splits `KEY=VALUE` at the first `=`.
fn parse_filter(arg: &str) -> SurveyResult<(String, String)> {
    match arg.split_once('=') {
        Some((k, v)) if !k.is_empty() && !v.is_empty() => Ok((k.to_string(), v.to_string())),
        _ => FilterSyntaxSnafu { arg }.fail(),
    }
}

fn provider_for(path: &str) -> String {
    let is_csv = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if is_csv {
        "csv".to_string()
    } else {
        "xlsx".to_string()
    }
}

/// Reads the configuration file if any, and applies the command line options
/// on top of it.
fn resolve_config(args: &Args) -> SurveyResult<ReportConfig> {
    let mut config = match &args.config {
        Some(config_path) => {
            let mut c = read_config(config_path)?;
            // Paths in the configuration are relative to the configuration file.
            let root_p = Path::new(config_path)
                .parent()
                .context(MissingParentDirSnafu { path: config_path })?;
            let p: PathBuf = [root_p, Path::new(&c.input_source.file_path)]
                .iter()
                .collect();
            c.input_source.file_path = p.as_path().display().to_string();
            if let Some(dir) = c.output_settings.output_directory.clone() {
                let p: PathBuf = [root_p, Path::new(&dir)].iter().collect();
                c.output_settings.output_directory = Some(p.as_path().display().to_string());
            }
            c
        }
        None => ReportConfig {
            output_settings: OutputSettings {
                survey_name: "Anket".to_string(),
                output_directory: None,
            },
            input_source: InputSource {
                provider: provider_for(DEFAULT_INPUT),
                file_path: DEFAULT_INPUT.to_string(),
                excel_worksheet_name: None,
            },
            demographic_columns: None,
            scale: None,
            filters: None,
            question: None,
        },
    };

    if let Some(input) = &args.input {
        config.input_source.file_path = input.clone();
        config.input_source.provider = provider_for(input);
    }
    if let Some(input_type) = &args.input_type {
        config.input_source.provider = input_type.clone();
    }
    if let Some(worksheet) = &args.excel_worksheet_name {
        config.input_source.excel_worksheet_name = Some(worksheet.clone());
    }
    if let Some(q) = &args.question {
        config.question = Some(q.clone());
    }
    Ok(config)
}

fn read_survey_table(source: &InputSource) -> SurveyResult<RawTable> {
    info!("Attempting to read survey file {:?}", source.file_path);
    match source.provider.as_str() {
        "xlsx" => io_excel::read_excel_table(
            &source.file_path,
            source.excel_worksheet_name.as_deref(),
        ),
        "csv" => io_csv::read_csv_table(&source.file_path),
        x => UnknownProviderSnafu { provider: x }.fail(),
    }
}

/// The filters of the configuration, with the columns given on the command
/// line replaced by the command line values.
fn merge_filters(
    headers: &DemographicHeaders,
    config_filters: Option<&BTreeMap<String, Vec<String>>>,
    cli_filters: &[String],
) -> SurveyResult<FilterSelection> {
    let mut cli_selection = FilterSelection::new();
    for arg in cli_filters.iter() {
        let (key, value) = parse_filter(arg)?;
        cli_selection
            .select(headers, &key, &[value])
            .context(EngineSnafu {})?;
    }

    let mut selection = FilterSelection::new();
    for (key, values) in config_filters.into_iter().flatten() {
        let column = headers.resolve(key).context(EngineSnafu {})?;
        if cli_selection.allowed(column).is_some() {
            info!(
                "Filter {:?} of the configuration replaced by the command line",
                key
            );
            continue;
        }
        selection.select_column(column, values);
    }
    for (column, values) in cli_selection.active() {
        let values: Vec<String> = values.iter().cloned().collect();
        selection.select_column(column, &values);
    }
    debug!("merge_filters: {:?}", selection);
    Ok(selection)
}

/// Where the summary goes: `None` for the standard output.
fn output_path(args: &Args, config: &ReportConfig) -> Option<String> {
    match (&args.out, &config.output_settings.output_directory) {
        (Some(out), _) if out.is_empty() || out == "stdout" => None,
        (Some(out), _) => Some(out.clone()),
        (None, Some(dir)) => {
            let p: PathBuf = [dir.as_str(), "summary.json"].iter().collect();
            Some(p.as_path().display().to_string())
        }
        (None, None) => None,
    }
}

pub fn run_report(args: &Args) -> SurveyResult<()> {
    let config = resolve_config(args)?;
    info!("config: {:?}", config);

    let scale = config.scale()?;
    let headers = config.demographic_headers()?;
    let table = read_survey_table(&config.input_source)?;
    let dataset = table_to_dataset(&table, &scale, &headers)?;
    info!(
        "Survey {:?}: {} respondents, {} questions",
        config.output_settings.survey_name,
        dataset.len(),
        dataset.questions().len()
    );

    let selection = merge_filters(&headers, config.filters.as_ref(), &args.filter)?;

    let request = ReportRequest {
        survey_name: config.output_settings.survey_name.clone(),
        selection,
        question: config.question.clone(),
        show_columns: args.show_columns,
    };
    let result_js = build_summary_js(&dataset, &request)?;
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;

    match output_path(args, &config) {
        Some(out_path) => {
            if let Some(parent) = Path::new(&out_path).parent() {
                fs::create_dir_all(parent).context(WritingOutputSnafu { path: &out_path })?;
            }
            info!("Writing summary to {:?}", out_path);
            fs::write(&out_path, &pretty_js_stats).context(WritingOutputSnafu { path: &out_path })?;
        }
        None => {
            println!("{}", pretty_js_stats);
        }
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &args.reference {
        let summary_ref = read_summary(summary_p)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference summary");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between calculated summary and reference summary")
        }
        info!("The summary matches the reference {:?}", summary_p);
    }

    Ok(())
}
