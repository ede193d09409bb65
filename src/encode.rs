//! Packaging of token ids as fixed-length classifier input.

use base64::Engine;

use crate::tokenizer::{CLS_INDEX, PAD_INDEX, SEP_INDEX};

pub const DEFAULT_MAX_LEN: usize = 128;

/// Single-sentence model input: `[CLS] ids [SEP]`, truncated or padded to a
/// fixed length. All three arrays have the same length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInput {
    pub input_ids: Vec<i64>,
    pub attention_mask: Vec<i64>,
    pub token_type_ids: Vec<i64>,
}

impl ModelInput {
    /// Truncation cuts the tail, so an over-long input loses its `[SEP]`.
    pub fn from_ids(ids: &[u32], max_len: usize) -> Self {
        let mut input_ids: Vec<i64> = Vec::with_capacity(max_len.max(ids.len() + 2));
        input_ids.push(CLS_INDEX as i64);
        input_ids.extend(ids.iter().map(|&id| id as i64));
        input_ids.push(SEP_INDEX as i64);
        input_ids.resize(max_len, PAD_INDEX as i64);

        let attention_mask = input_ids
            .iter()
            .map(|&id| i64::from(id != PAD_INDEX as i64))
            .collect();
        let token_type_ids = vec![0; max_len];

        ModelInput {
            input_ids,
            attention_mask,
            token_type_ids,
        }
    }

    pub fn len(&self) -> usize {
        self.input_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input_ids.is_empty()
    }

    /// Number of non-padding positions.
    pub fn real_tokens(&self) -> usize {
        self.attention_mask.iter().filter(|&&m| m != 0).count()
    }

    /// `input_ids` as little-endian int64 bytes, base64-encoded.
    pub fn packed_ids(&self) -> String {
        let mut bytes = Vec::with_capacity(self.input_ids.len() * 8);
        for &id in &self.input_ids {
            bytes.extend_from_slice(&id.to_le_bytes());
        }
        base64::engine::general_purpose::STANDARD.encode(bytes)
    }

    pub fn to_json(&self, with_packed: bool) -> serde_json::Value {
        let mut obj = serde_json::json!({
            "input_ids": self.input_ids,
            "attention_mask": self.attention_mask,
            "token_type_ids": self.token_type_ids,
        });
        if with_packed {
            obj["input_ids_b64"] = serde_json::json!(self.packed_ids());
        }
        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_and_pads() {
        let input = ModelInput::from_ids(&[2023, 2003], 6);
        assert_eq!(input.input_ids, vec![101, 2023, 2003, 102, 0, 0]);
        assert_eq!(input.attention_mask, vec![1, 1, 1, 1, 0, 0]);
        assert_eq!(input.token_type_ids, vec![0; 6]);
        assert_eq!(input.real_tokens(), 4);
    }

    #[test]
    fn test_truncation_drops_sep() {
        let input = ModelInput::from_ids(&[5, 6, 7, 8], 4);
        assert_eq!(input.input_ids, vec![101, 5, 6, 7]);
        assert_eq!(input.attention_mask, vec![1; 4]);
    }

    #[test]
    fn test_empty_ids() {
        let input = ModelInput::from_ids(&[], DEFAULT_MAX_LEN);
        assert_eq!(input.len(), DEFAULT_MAX_LEN);
        assert_eq!(&input.input_ids[..3], &[101, 102, 0]);
        assert_eq!(input.real_tokens(), 2);
    }

    #[test]
    fn test_pad_id_inside_ids_is_masked() {
        let input = ModelInput::from_ids(&[0, 7], 5);
        assert_eq!(input.attention_mask, vec![1, 0, 1, 1, 0]);
    }

    #[test]
    fn test_packed_ids() {
        let input = ModelInput::from_ids(&[], 2);
        let raw = base64::engine::general_purpose::STANDARD
            .decode(input.packed_ids())
            .unwrap();
        assert_eq!(raw.len(), 16);
        assert_eq!(&raw[..8], &101i64.to_le_bytes());
        assert_eq!(&raw[8..], &102i64.to_le_bytes());
    }

    #[test]
    fn test_to_json() {
        let input = ModelInput::from_ids(&[7], 4);
        let json = input.to_json(false);
        assert_eq!(json["input_ids"], serde_json::json!([101, 7, 102, 0]));
        assert_eq!(json["attention_mask"], serde_json::json!([1, 1, 1, 0]));
        assert!(json.get("input_ids_b64").is_none());
        assert!(input.to_json(true)["input_ids_b64"].is_string());
    }
}
