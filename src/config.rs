//! Command-line and environment configuration for the `bertok` binary.

use crate::encode::DEFAULT_MAX_LEN;
use crate::error::ConfigError;
use crate::vocab::{EmbeddedSource, DEFAULT_VOCAB_PATH, EMBEDDED_PREFIX};

pub const VOCAB_ENV: &str = "BERTOK_VOCAB";
pub const MAX_LEN_ENV: &str = "BERTOK_MAX_LEN";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// Space-separated ids, one line per input.
    Ids,
    /// Token counts, tokencount style.
    Count,
    /// `id offset` pairs, one per line.
    Offsets,
    /// Fixed-length model input as JSON.
    Pack,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub vocab: String,
    pub output: Output,
    pub max_len: usize,
    pub base64: bool,
    pub help: bool,
    pub version: bool,
    pub paths: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let argv: Vec<String> = std::env::args().skip(1).collect();
        Self::parse(&argv, |key| std::env::var(key).ok())
    }

    /// Arguments win over environment, environment over defaults.
    pub fn parse<F>(argv: &[String], env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut vocab: Option<String> = None;
        let mut max_len: Option<String> = None;
        let mut config = Config {
            vocab: String::new(),
            output: Output::Ids,
            max_len: DEFAULT_MAX_LEN,
            base64: false,
            help: false,
            version: false,
            paths: Vec::new(),
        };

        let mut i = 0;
        while i < argv.len() {
            match argv[i].as_str() {
                "-V" | "--version" => config.version = true,
                "-h" | "--help" => config.help = true,
                "-c" | "--count" => config.output = Output::Count,
                "-o" | "--offsets" => config.output = Output::Offsets,
                "-p" | "--pack" => config.output = Output::Pack,
                "--base64" => config.base64 = true,
                "-v" | "--vocab" => {
                    i += 1;
                    vocab = Some(value(argv, i, "--vocab")?);
                }
                "--max-len" => {
                    i += 1;
                    max_len = Some(value(argv, i, "--max-len")?);
                }
                s if s.starts_with('-') && s != "-" => {
                    return Err(ConfigError::UnknownOption(s.to_string()));
                }
                _ => config.paths.push(argv[i].clone()),
            }
            i += 1;
        }

        config.vocab = vocab
            .or_else(|| env(VOCAB_ENV))
            .unwrap_or_else(default_vocab);

        if let Some(raw) = max_len.or_else(|| env(MAX_LEN_ENV)) {
            config.max_len = match raw.parse::<usize>() {
                Ok(n) if n >= 2 => n,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "max-len".to_string(),
                        value: raw,
                    })
                }
            };
        }
        Ok(config)
    }
}

fn value(argv: &[String], i: usize, name: &str) -> Result<String, ConfigError> {
    argv.get(i)
        .cloned()
        .ok_or_else(|| ConfigError::MissingValue(name.to_string()))
}

fn default_vocab() -> String {
    if EmbeddedSource::is_available() {
        EMBEDDED_PREFIX.to_string()
    } else {
        DEFAULT_VOCAB_PATH.to_string()
    }
}
