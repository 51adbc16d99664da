use clap::Parser;

/// Agreement-scale survey reporting program.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the survey: input file, demographic columns,
    /// scale and filters. Paths in this file are relative to the file itself.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, default anket.xlsx) The survey export. Setting this option overrides the file
    /// that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (xlsx or csv) The type of the input. By default it is guessed from the file extension.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use. Not needed if the
    /// workbook only has one worksheet.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (KEY=VALUE, repeatable) Only keeps the respondents with this value in a demographic column.
    /// KEY is a column key (gender, age, tenure, position, department), its label or its header.
    /// Values given for the same column are alternatives, and replace the values of that column in
    /// the configuration.
    #[clap(short, long, value_parser)]
    pub filter: Vec<String>,

    /// (question header) The question to detail. Defaults to the first question.
    #[clap(short, long, value_parser)]
    pub question: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary will be written in JSON format to
    /// the given location. Setting this option overrides the output directory of the configuration.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference summary in JSON format. If provided, likertrpt will check that the
    /// computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// If passed as an argument, the summary also lists the demographic and question columns.
    #[clap(long, takes_value = false)]
    pub show_columns: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
