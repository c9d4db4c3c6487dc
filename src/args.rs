use clap::Parser;

/// Remaps the answers of a quiz spreadsheet to letter codes and scores every respondent.
///
/// The first row of the first sheet holds the correct answer of every question, the
/// first two columns hold the respondent's name and class.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, .xlsx) The spreadsheet with the answer key and the responses. May also be
    /// provided through the configuration file.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (directory or .xlsx file path) Where to write the processed spreadsheet. A directory
    /// receives a generated file name. Defaults to the current directory.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path, optional) A JSON file with the options of the run. Command line flags
    /// take precedence over it.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (integer) Seed for the random choice of the answer key codes. Runs with the same
    /// seed and input produce the same codes.
    #[clap(long, value_parser)]
    pub seed: Option<u64>,

    /// If passed, the header row does not receive the concatenated answer key codes.
    #[clap(long, takes_value = false)]
    pub no_key_column: bool,

    /// (default NILAI) Header label of the score column.
    #[clap(long, value_parser)]
    pub score_label: Option<String>,

    /// If passed, a question with more than four wrong answers fails the run instead of
    /// giving two answers the same code.
    #[clap(long, takes_value = false)]
    pub strict_codes: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard error.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
