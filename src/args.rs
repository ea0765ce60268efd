//! Command-line parsing.
//!
//! Options follow the single-dash convention (`-top 3`, not `--top=3`),
//! which the argument parsing libraries do not support, so this is hand-rolled.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use strum::{EnumString, IntoStaticStr, VariantArray};

use crate::{
    dc_err, error::ClassifierError, model::ModelSource, model::REPO_URL, rank::TOP_N,
};

#[derive(EnumString, IntoStaticStr, VariantArray, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "kebab-case")]
pub enum Arg {
    ModelUrl,
    LabelsUrl,
    CacheDir,
    Top,
    Html,
    ExamplesUrl,
}

impl Arg {
    pub fn help_text(&self) -> &'static str {
        match self {
            Arg::ModelUrl => "URL of the ONNX model, downloaded once",
            Arg::LabelsUrl => "URL of the breed list, one per line, downloaded once",
            Arg::CacheDir => "directory downloaded files are kept in",
            Arg::Top => "number of breeds to report",
            Arg::Html => "also write the results as an HTML page to this file",
            Arg::ExamplesUrl => "base URL of the example breed photos",
        }
    }
}

/// Everything a single run needs to know
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input: PathBuf,
    pub source: ModelSource,
    pub top: usize,
    pub html: Option<PathBuf>,
    pub examples_url: String,
}

impl Config {
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            source: ModelSource::default(),
            top: TOP_N,
            html: None,
            examples_url: REPO_URL.to_owned(),
        }
    }

    fn apply_arg(&mut self, arg: Arg, value: &OsStr) -> Result<(), ClassifierError> {
        let arg_string: &'static str = arg.into();
        match arg {
            Arg::ModelUrl => self.source.model_url = utf8_value(arg_string, value)?,
            Arg::LabelsUrl => self.source.labels_url = utf8_value(arg_string, value)?,
            Arg::CacheDir => self.source.cache_dir = PathBuf::from(value),
            Arg::Top => {
                self.top = match utf8_value(arg_string, value)?.trim().parse::<usize>() {
                    Ok(n) if n > 0 => n,
                    _ => return Err(invalid_value(arg_string, value)),
                }
            }
            Arg::Html => self.html = Some(PathBuf::from(value)),
            Arg::ExamplesUrl => self.examples_url = utf8_value(arg_string, value)?,
        }
        Ok(())
    }
}

pub fn parse_args(args: Vec<OsString>) -> Result<Config, ClassifierError> {
    let mut options = Vec::new();
    let mut input = None;

    let mut iter = args.into_iter().skip(1); // skip argv[0], path to our binary
    while let Some(raw_arg) = iter.next() {
        if starts_with_dash(&raw_arg) {
            let name = raw_arg
                .to_str()
                .map(|s| s.trim_start_matches('-'))
                .ok_or_else(|| dc_err!("unrecognized option `{}'", raw_arg.to_string_lossy()))?;
            let arg = Arg::try_from(name)
                .map_err(|_| dc_err!("unrecognized option `{}'", raw_arg.to_string_lossy()))?;
            let value = iter.next().ok_or_else(|| {
                let arg_string: &'static str = arg.into();
                dc_err!("argument requires a value: {arg_string}")
            })?;
            options.push((arg, value));
        } else if input.is_none() {
            input = Some(PathBuf::from(raw_arg));
        } else {
            return Err(dc_err!("only one image can be classified at a time"));
        }
    }

    let input = input.ok_or_else(|| dc_err!("no images defined"))?;
    let mut config = Config::new(input);
    for (arg, value) in options {
        config.apply_arg(arg, &value)?;
    }
    Ok(config)
}

/// Checks if the argument is an option, i.e. starts with `-` and isn't just `-`
fn starts_with_dash(arg: &OsStr) -> bool {
    let bytes = arg.as_encoded_bytes();
    bytes.len() > 1 && bytes[0] == b'-'
}

fn utf8_value(arg_string: &str, value: &OsStr) -> Result<String, ClassifierError> {
    value
        .to_str()
        .map(str::to_owned)
        .ok_or_else(|| invalid_value(arg_string, value))
}

fn invalid_value(arg_string: &str, value: &OsStr) -> ClassifierError {
    dc_err!(
        "invalid argument for option `-{arg_string}': {}",
        value.to_string_lossy()
    )
}
