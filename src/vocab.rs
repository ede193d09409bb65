//! Vocabulary assets and where they come from.
//!
//! A vocabulary is a JSON array of strings; the array position of each
//! entry is its token id. The host decides where the bytes come from by
//! handing the tokenizer a [`VocabSource`].

use std::path::{Path, PathBuf};

use crate::error::LoadError;

mod embedded {
    include!(concat!(env!("OUT_DIR"), "/embedded_vocab.rs"));
}

/// Default location of the vocabulary relative to the working directory.
pub const DEFAULT_VOCAB_PATH: &str = "public/static/vocab.json";

/// Prefix selecting the vocabulary compiled into the binary.
pub const EMBEDDED_PREFIX: &str = "embedded:";

/// A byte source for the vocabulary asset.
pub trait VocabSource: Send + Sync {
    fn fetch(&self) -> Result<Vec<u8>, LoadError>;

    /// Human-readable location, used in log lines.
    fn describe(&self) -> String;
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }
}

impl VocabSource for FileSource {
    fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        std::fs::read(&self.path).map_err(|source| LoadError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Blocking HTTP(S) GET.
pub struct UrlSource {
    url: String,
}

impl UrlSource {
    pub fn new(url: impl Into<String>) -> Self {
        UrlSource { url: url.into() }
    }

    fn http_error(&self, message: impl std::fmt::Display) -> LoadError {
        LoadError::Http {
            url: self.url.clone(),
            message: message.to_string(),
        }
    }
}

impl VocabSource for UrlSource {
    fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("bertok/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| self.http_error(format!("failed to create HTTP client: {e}")))?;

        let response = client
            .get(&self.url)
            .send()
            .map_err(|e| self.http_error(e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(self.http_error(format!("HTTP status {status}")));
        }
        let body = response.bytes().map_err(|e| self.http_error(e))?;
        Ok(body.to_vec())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// The vocabulary compiled in by the build script, if any.
pub struct EmbeddedSource;

impl EmbeddedSource {
    pub fn is_available() -> bool {
        embedded::VOCAB.is_some()
    }

    pub fn entry_count() -> usize {
        embedded::VOCAB_LEN
    }
}

impl VocabSource for EmbeddedSource {
    fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        embedded::VOCAB
            .map(<[u8]>::to_vec)
            .ok_or(LoadError::NotEmbedded)
    }

    fn describe(&self) -> String {
        format!("embedded ({} entries)", embedded::VOCAB_LEN)
    }
}

/// Bytes already held in memory.
pub struct MemorySource {
    bytes: Vec<u8>,
}

impl MemorySource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        MemorySource {
            bytes: bytes.into(),
        }
    }

    /// Serializes `words` as the JSON vocabulary format.
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Self {
        let words: Vec<&str> = words.iter().map(AsRef::as_ref).collect();
        MemorySource {
            bytes: serde_json::to_vec(&words).unwrap_or_default(),
        }
    }
}

impl VocabSource for MemorySource {
    fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        Ok(self.bytes.clone())
    }

    fn describe(&self) -> String {
        format!("memory ({} bytes)", self.bytes.len())
    }
}

/// Picks a source from a location string: URLs, the embedded marker, or a
/// filesystem path.
pub fn source_for(location: &str) -> Box<dyn VocabSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(UrlSource::new(location))
    } else if location == EMBEDDED_PREFIX {
        Box::new(EmbeddedSource)
    } else {
        Box::new(FileSource::new(Path::new(location)))
    }
}

/// Parses the JSON array-of-strings vocabulary format.
pub fn parse_vocab(bytes: &[u8]) -> Result<Vec<String>, LoadError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| LoadError::Parse(format!("invalid UTF-8: {e}")))?;
    serde_json::from_str(text).map_err(|e| LoadError::Parse(e.to_string()))
}
