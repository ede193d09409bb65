//! Build-once handle to a shared tokenizer.
//!
//! The host creates one [`TokenizerCell`] at startup and passes it to
//! whoever needs tokenization. The first `get_or_load` builds the trie while
//! holding the lock; callers racing it wait and receive the same instance.

use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::error::LoadError;
use crate::tokenizer::BertTokenizer;
use crate::vocab::VocabSource;

pub struct TokenizerCell {
    source: Box<dyn VocabSource>,
    slot: Mutex<Option<Arc<BertTokenizer>>>,
}

impl TokenizerCell {
    pub fn new(source: Box<dyn VocabSource>) -> Self {
        TokenizerCell {
            source,
            slot: Mutex::new(None),
        }
    }

    /// Returns the loaded tokenizer, loading it on first use. A failed load
    /// leaves the cell empty so the next call tries again.
    pub fn get_or_load(&self) -> Result<Arc<BertTokenizer>, LoadError> {
        let mut guard = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(ref tok) = *guard {
            return Ok(Arc::clone(tok));
        }
        debug!(source = %self.source.describe(), "loading tokenizer for the first time");
        let tok = Arc::new(BertTokenizer::load(self.source.as_ref())?);
        *guard = Some(Arc::clone(&tok));
        Ok(tok)
    }

    /// The tokenizer if it has already been loaded.
    pub fn get(&self) -> Option<Arc<BertTokenizer>> {
        self.slot
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(Arc::clone)
    }
}
