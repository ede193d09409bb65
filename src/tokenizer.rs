//! BERT WordPiece tokenizer: pre-tokenization followed by greedy
//! longest-match-first segmentation over the vocabulary trie.
//!
//! Each word is prefixed with U+2581 and NFKC-normalized before lookup. A
//! word is either segmented completely into known pieces or replaced by a
//! single `[UNK]` id.

use tracing::{debug, info, warn};
use unicode_normalization::UnicodeNormalization;

use crate::error::LoadError;
use crate::normalize::{process_input, Token};
use crate::trie::Trie;
use crate::vocab::{parse_vocab, VocabSource};

/// Word-start marker, "lower one eighth block".
pub const SEPARATOR: char = '\u{2581}';

pub const PAD_INDEX: u32 = 0;
pub const UNK_INDEX: u32 = 100;
pub const CLS_INDEX: u32 = 101;
pub const CLS_TOKEN: &str = "[CLS]";
pub const SEP_INDEX: u32 = 102;
pub const SEP_TOKEN: &str = "[SEP]";

/// Score stored with every vocabulary entry. Segmentation only uses indices.
const DEFAULT_SCORE: f32 = 1.0;

pub struct BertTokenizer {
    vocab: Vec<String>,
    trie: Trie,
}

impl BertTokenizer {
    /// Fetches and parses the vocabulary from `source` and builds the trie.
    pub fn load(source: &dyn VocabSource) -> Result<Self, LoadError> {
        let bytes = source.fetch()?;
        let vocab = parse_vocab(&bytes)?;
        info!(
            entries = vocab.len(),
            source = %source.describe(),
            "loaded vocabulary"
        );
        Ok(Self::from_vocab(vocab))
    }

    /// Builds the trie from an in-memory vocabulary. Position is id; a
    /// repeated string keeps the later id.
    pub fn from_vocab(vocab: Vec<String>) -> Self {
        let mut trie = Trie::new();
        for (index, word) in vocab.iter().enumerate() {
            if let Some(previous) = trie.insert(word, DEFAULT_SCORE, index as u32) {
                warn!(word = %word, previous, index, "duplicate vocabulary entry");
            }
        }
        debug!(nodes = trie.len(), "built vocabulary trie");
        BertTokenizer { vocab, trie }
    }

    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    pub fn id_to_token(&self, id: u32) -> Option<&str> {
        self.vocab.get(id as usize).map(String::as_str)
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    /// Converts `text` to vocabulary ids. Never fails: unknown words map to
    /// [`UNK_INDEX`], and empty or blank input yields no ids.
    pub fn tokenize(&self, text: &str) -> Vec<u32> {
        let mut ids = Vec::new();
        for token in process_input(text) {
            self.segment(&lookup_form(&token), &mut ids);
        }
        debug!(ids = ids.len(), "tokenized input");
        ids
    }

    /// Like [`tokenize`](Self::tokenize), pairing every id with the code-point
    /// offset of the word it came from.
    pub fn tokenize_with_offsets(&self, text: &str) -> Vec<(u32, usize)> {
        let mut out = Vec::new();
        let mut ids = Vec::new();
        for token in process_input(text) {
            ids.clear();
            self.segment(&lookup_form(&token), &mut ids);
            out.extend(ids.iter().map(|&id| (id, token.offset)));
        }
        out
    }

    /// Greedy longest-match-first segmentation of one word, appended to `out`.
    fn segment(&self, word: &str, out: &mut Vec<u32>) {
        let chars: Vec<char> = word.chars().collect();
        let mark = out.len();
        let mut start = 0;

        while start < chars.len() {
            match self.trie.longest_prefix(&chars[start..]) {
                Some((len, index)) => {
                    out.push(index);
                    start += len;
                }
                None => {
                    out.truncate(mark);
                    out.push(UNK_INDEX);
                    return;
                }
            }
        }
    }
}

/// Marker-prefixed NFKC form used for lookup; reserved markers pass through.
fn lookup_form(token: &Token) -> String {
    if token.text == CLS_TOKEN || token.text == SEP_TOKEN {
        return token.text.clone();
    }
    std::iter::once(SEPARATOR)
        .chain(token.text.chars())
        .nfkc()
        .collect()
}
