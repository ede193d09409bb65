//! WordPiece tokenization against a fixed BERT vocabulary.
//!
//! ```no_run
//! use bertok::{BertTokenizer, FileSource};
//!
//! let tokenizer = BertTokenizer::load(&FileSource::new("public/static/vocab.json"))?;
//! let ids = tokenizer.tokenize("Hello, world!");
//! # Ok::<(), bertok::LoadError>(())
//! ```

pub mod cache;
pub mod config;
pub mod encode;
pub mod error;
pub mod normalize;
pub mod tokenizer;
pub mod trie;
pub mod vocab;

pub use cache::TokenizerCell;
pub use encode::{ModelInput, DEFAULT_MAX_LEN};
pub use error::{ConfigError, LoadError};
pub use normalize::{clean_text, process_input, split_on_punc, Token};
pub use tokenizer::{
    BertTokenizer, CLS_INDEX, CLS_TOKEN, PAD_INDEX, SEP_INDEX, SEP_TOKEN, SEPARATOR, UNK_INDEX,
};
pub use trie::Trie;
pub use vocab::{
    parse_vocab, source_for, EmbeddedSource, FileSource, MemorySource, UrlSource, VocabSource,
};
