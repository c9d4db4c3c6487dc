use crate::args::Args;
use crate::remap::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use std::fs;

/// The JSON configuration file. Every entry is optional.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemapConfig {
    #[serde(rename = "inputFile")]
    pub input_file: Option<String>,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "outputPrefix")]
    pub output_prefix: Option<String>,
    #[serde(rename = "sheetName")]
    pub sheet_name: Option<String>,
    #[serde(rename = "includeKeyColumn")]
    pub include_key_column: Option<bool>,
    #[serde(rename = "scoreLabel")]
    pub score_label: Option<String>,
    #[serde(rename = "randomSeed")]
    _random_seed: Option<JSValue>,
    #[serde(rename = "codeOverflow")]
    _code_overflow: Option<String>,
}

impl RemapConfig {
    pub fn random_seed(&self) -> RunResult<Option<u64>> {
        match &self._random_seed {
            None | Some(JSValue::Null) => Ok(None),
            Some(JSValue::Number(n)) => n.as_u64().map(Some).context(ParsingJsonNumberSnafu {
                field: "randomSeed",
            }),
            Some(JSValue::String(s)) => s.trim().parse::<u64>().ok().map(Some).context(
                ParsingJsonNumberSnafu {
                    field: "randomSeed",
                },
            ),
            Some(_) => None.context(ParsingJsonNumberSnafu {
                field: "randomSeed",
            }),
        }
    }

    pub fn code_overflow(&self) -> RunResult<Option<CodeOverflow>> {
        match self._code_overflow.as_deref() {
            None => Ok(None),
            Some("wrap") => Ok(Some(CodeOverflow::Wrap)),
            Some("reject") => Ok(Some(CodeOverflow::Reject)),
            Some(x) => UnknownOverflowModeSnafu { mode: x }.fail(),
        }
    }
}

pub fn parse_config(contents: &str) -> RunResult<RemapConfig> {
    serde_json::from_str(contents).context(ParsingJsonSnafu {})
}

pub fn read_config(path: &Path) -> RunResult<RemapConfig> {
    info!("Attempting to read configuration {:?}", path.display());
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu {
        path: path.display().to_string(),
    })?;
    let config = parse_config(&contents)?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

// Relative paths in the configuration file are relative to the file itself.
fn resolve_path(root: &Path, p: &str) -> PathBuf {
    let pb = PathBuf::from(p);
    if pb.is_absolute() {
        pb
    } else {
        root.join(pb)
    }
}

fn output_target(p: PathBuf) -> OutputTarget {
    let is_file = p
        .extension()
        .map(|e| e.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false);
    if is_file {
        OutputTarget::File(p)
    } else {
        OutputTarget::Directory(p)
    }
}

/// Merges the configuration file (if any) and the command line. The command line wins.
///
/// `config` comes with the directory of the configuration file.
pub fn resolve_settings(args: &Args, config: Option<(RemapConfig, PathBuf)>) -> RunResult<RunSettings> {
    let (config, root) = config.unwrap_or_else(|| (RemapConfig::default(), PathBuf::from(".")));
    let mut settings = RunSettings::with_input(None);

    settings.input = match (&args.input, &config.input_file) {
        (Some(i), _) => Some(PathBuf::from(i)),
        (None, Some(i)) => Some(resolve_path(&root, i)),
        (None, None) => None,
    };

    if let Some(o) = &args.out {
        settings.output = output_target(PathBuf::from(o));
    } else if let Some(o) = &config.output_directory {
        settings.output = output_target(resolve_path(&root, o));
    }

    if let Some(prefix) = &config.output_prefix {
        settings.output_prefix = prefix.clone();
    }
    if let Some(name) = &config.sheet_name {
        settings.sheet_name = name.clone();
    }

    settings.random_seed = match args.seed {
        Some(s) => Some(s),
        None => config.random_seed()?,
    };

    if let Some(mode) = config.code_overflow()? {
        settings.rules.code_overflow = mode;
    }
    if args.strict_codes {
        settings.rules.code_overflow = CodeOverflow::Reject;
    }

    if let Some(b) = config.include_key_column {
        settings.rules.include_key_column = b;
    }
    if args.no_key_column {
        settings.rules.include_key_column = false;
    }

    if let Some(label) = args.score_label.as_ref().or(config.score_label.as_ref()) {
        settings.rules.score_label = label.clone();
    }

    debug!("resolve_settings: {:?}", settings);
    Ok(settings)
}

/// Reads the configuration file named on the command line, if any, and merges it.
pub fn settings_from_args(args: &Args) -> RunResult<RunSettings> {
    match &args.config {
        Some(p) => {
            let path = PathBuf::from(p);
            let config = read_config(&path)?;
            let root = path
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from("."));
            resolve_settings(args, Some((config, root)))
        }
        None => resolve_settings(args, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(cmd: &[&str]) -> Args {
        let mut all = vec!["answer-remap"];
        all.extend_from_slice(cmd);
        Args::parse_from(all)
    }

    #[test]
    fn defaults() {
        let s = resolve_settings(&args(&["-i", "quiz.xlsx"]), None).unwrap();
        assert_eq!(s.input, Some(PathBuf::from("quiz.xlsx")));
        assert_eq!(s.output, OutputTarget::Directory(PathBuf::from(".")));
        assert_eq!(s.output_prefix, "ANABUT");
        assert_eq!(s.sheet_name, "Processed Data");
        assert_eq!(s.random_seed, None);
        assert_eq!(s.rules, RemapRules::default());
    }

    #[test]
    fn parse_full_config() {
        let config = parse_config(
            r#"{
                "inputFile": "responses.xlsx",
                "outputDirectory": "out",
                "outputPrefix": "QUIZ",
                "sheetName": "Scores",
                "includeKeyColumn": false,
                "scoreLabel": "SCORE",
                "randomSeed": "42",
                "codeOverflow": "reject"
            }"#,
        )
        .unwrap();
        assert_eq!(config.random_seed().unwrap(), Some(42));
        assert_eq!(config.code_overflow().unwrap(), Some(CodeOverflow::Reject));

        let s = resolve_settings(&args(&[]), Some((config, PathBuf::from("conf")))).unwrap();
        assert_eq!(s.input, Some(PathBuf::from("conf").join("responses.xlsx")));
        assert_eq!(s.output, OutputTarget::Directory(PathBuf::from("conf").join("out")));
        assert_eq!(s.output_prefix, "QUIZ");
        assert_eq!(s.sheet_name, "Scores");
        assert_eq!(s.random_seed, Some(42));
        assert_eq!(s.rules.code_overflow, CodeOverflow::Reject);
        assert!(!s.rules.include_key_column);
        assert_eq!(s.rules.score_label, "SCORE");
    }

    #[test]
    fn flags_override_config() {
        let config = parse_config(
            r#"{"inputFile": "a.xlsx", "randomSeed": 3, "scoreLabel": "SCORE"}"#,
        )
        .unwrap();
        let s = resolve_settings(
            &args(&[
                "-i",
                "b.xlsx",
                "-o",
                "result.xlsx",
                "--seed",
                "9",
                "--score-label",
                "TOTAL",
                "--strict-codes",
                "--no-key-column",
            ]),
            Some((config, PathBuf::from("conf"))),
        )
        .unwrap();
        assert_eq!(s.input, Some(PathBuf::from("b.xlsx")));
        assert_eq!(s.output, OutputTarget::File(PathBuf::from("result.xlsx")));
        assert_eq!(s.random_seed, Some(9));
        assert_eq!(s.rules.score_label, "TOTAL");
        assert_eq!(s.rules.code_overflow, CodeOverflow::Reject);
        assert!(!s.rules.include_key_column);
    }

    #[test]
    fn bad_values() {
        let config = parse_config(r#"{"randomSeed": "soon"}"#).unwrap();
        assert!(matches!(
            config.random_seed(),
            Err(RemapError::ParsingJsonNumber { .. })
        ));
        let config = parse_config(r#"{"codeOverflow": "merge"}"#).unwrap();
        assert!(matches!(
            config.code_overflow(),
            Err(RemapError::UnknownOverflowMode { .. })
        ));
        assert!(matches!(
            parse_config("{not json"),
            Err(RemapError::ParsingJson { .. })
        ));
    }

    #[test]
    fn read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("remap.json");
        fs::write(&p, r#"{"inputFile": "quiz.xlsx"}"#).unwrap();
        let a = args(&["-c", p.to_str().unwrap()]);
        let s = settings_from_args(&a).unwrap();
        assert_eq!(s.input, Some(dir.path().join("quiz.xlsx")));

        let missing = args(&["-c", "/nonexistent/remap.json"]);
        assert!(matches!(
            settings_from_args(&missing),
            Err(RemapError::OpeningJson { .. })
        ));
    }
}
