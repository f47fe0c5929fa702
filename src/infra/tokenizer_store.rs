// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Fits, saves and reloads the vocabulary used to turn the four
// string columns (flow ID, source IP, destination IP, timestamp)
// into integer ids.
//
// Every distinct field value is one vocabulary entry. Ids are
// assigned by descending frequency starting at 1; ties keep the
// order in which values were first seen. Id 0 is reserved for
// values that were never seen during fitting.
//
// Two files are written:
//   word-dictionary.json  — {"value": id, ...} in rank order
//   word-tokenizer.json   — the same vocabulary as a HuggingFace
//                           WordLevel tokenizer, reloaded through
//                           tokenizers::Tokenizer for lookups
//
// The tokenizer JSON is assembled by hand and loaded back with
// Tokenizer::from_file, so no trainer types are involved.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokenizers::Tokenizer;

pub const UNKNOWN_TOKEN: &str = "[UNK]";
pub const UNKNOWN_ID:    u32  = 0;

const TOKENIZER_FILE_NAME: &str = "word-tokenizer.json";

pub struct TokenizerStore {
    dictionary_file: PathBuf,
}

impl TokenizerStore {
    pub fn new(dictionary_file: impl Into<PathBuf>) -> Self {
        Self { dictionary_file: dictionary_file.into() }
    }

    pub fn dictionary_file(&self) -> &Path {
        &self.dictionary_file
    }

    /// The tokenizer JSON lives next to the dictionary file
    pub fn tokenizer_file(&self) -> PathBuf {
        self.dictionary_file
            .parent()
            .map(|dir| dir.join(TOKENIZER_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(TOKENIZER_FILE_NAME))
    }

    /// Fit a vocabulary over `values`, persist it and return a tokenizer for it.
    pub fn fit_and_save<'a, I>(&self, values: I) -> Result<FieldTokenizer>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let word_index = build_word_index(values);

        if let Some(dir) = self.dictionary_file.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir).with_context(|| {
                    format!("Cannot create dictionary directory '{}'", dir.display())
                })?;
            }
        }

        // ── Word dictionary ───────────────────────────────────────────────────
        let mut dictionary = serde_json::Map::with_capacity(word_index.len());
        for (word, id) in &word_index {
            dictionary.insert(word.clone(), serde_json::json!(id));
        }
        std::fs::write(&self.dictionary_file, serde_json::to_string(&dictionary)?)
            .with_context(|| {
                format!("Cannot write word dictionary '{}'", self.dictionary_file.display())
            })?;

        // ── Tokenizer JSON in HuggingFace format ──────────────────────────────
        let mut vocab = dictionary;
        vocab.insert(UNKNOWN_TOKEN.to_string(), serde_json::json!(UNKNOWN_ID));

        let tokenizer_json = serde_json::json!({
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": [
                {"id": UNKNOWN_ID, "content": UNKNOWN_TOKEN, "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
            ],
            "normalizer": null,
            "pre_tokenizer": null,
            "post_processor": null,
            "decoder": null,
            "model": {
                "type": "WordLevel",
                "vocab": vocab,
                "unk_token": UNKNOWN_TOKEN
            }
        });

        let tok_path = self.tokenizer_file();
        std::fs::write(&tok_path, serde_json::to_string(&tokenizer_json)?)
            .with_context(|| format!("Cannot write tokenizer JSON '{}'", tok_path.display()))?;

        tracing::info!(
            "Vocabulary of {} values saved to '{}'",
            word_index.len(),
            self.dictionary_file.display()
        );

        self.load()
    }

    /// Load a previously saved tokenizer
    pub fn load(&self) -> Result<FieldTokenizer> {
        let path = self.tokenizer_file();
        let tokenizer = Tokenizer::from_file(&path).map_err(|e| {
            anyhow::anyhow!("Cannot load tokenizer from '{}': {}", path.display(), e)
        })?;
        Ok(FieldTokenizer { tokenizer })
    }
}

/// Rank every distinct value by frequency. Ids start at 1.
pub fn build_word_index<'a, I>(values: I) -> Vec<(String, u32)>
where
    I: IntoIterator<Item = &'a str>,
{
    // value → (count, first position seen)
    let mut counts: HashMap<&'a str, (usize, usize)> = HashMap::new();
    for (pos, value) in values.into_iter().enumerate() {
        if value == UNKNOWN_TOKEN {
            continue;
        }
        counts.entry(value).or_insert((0, pos)).0 += 1;
    }

    let mut ranked: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));

    ranked
        .into_iter()
        .zip(1u32..)
        .map(|((word, _), id)| (word.to_string(), id))
        .collect()
}

/// Maps a string field value to its vocabulary id.
pub struct FieldTokenizer {
    tokenizer: Tokenizer,
}

impl FieldTokenizer {
    /// Id of `value`, or UNKNOWN_ID when it was not in the fitted vocabulary
    pub fn id(&self, value: &str) -> u32 {
        self.tokenizer.token_to_id(value).unwrap_or(UNKNOWN_ID)
    }

    /// Number of entries including the unknown token
    pub fn vocab_size(&self) -> usize {
        self.tokenizer.get_vocab_size(false)
    }
}
