use crate::tts::{AudioFormat, TtsBackend, TtsError, Voice};
use std::time::Duration;

/// Longest text the translate endpoint accepts in one request.
pub const MAX_CHUNK_CHARS: usize = 200;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// The key-less Google Translate voice. MP3 only.
pub struct TranslateTts {
    language: String,
    client: reqwest::blocking::Client,
}

impl TranslateTts {
    pub fn new(voice: Voice) -> Result<Self, TtsError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("Mozilla/5.0 (X11; Linux x86_64)")
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TtsError::SynthesisError(format!("HTTP client error: {}", e)))?;
        Ok(Self {
            language: voice.language_code().to_string(),
            client,
        })
    }

    fn fetch_chunk(&self, chunk: &str, idx: usize, total: usize) -> Result<Vec<u8>, TtsError> {
        let chars = chunk.chars().count().to_string();
        let idx = idx.to_string();
        let total = total.to_string();

        let response = self
            .client
            .get("https://translate.google.com/translate_tts")
            .query(&[
                ("ie", "UTF-8"),
                ("q", chunk),
                ("tl", self.language.as_str()),
                ("client", "tw-ob"),
                ("total", total.as_str()),
                ("idx", idx.as_str()),
                ("textlen", chars.as_str()),
            ])
            .send()
            .map_err(|e| TtsError::SynthesisError(format!("HTTP request failed: {}", e.without_url())))?;

        if !response.status().is_success() {
            return Err(TtsError::SynthesisError(format!(
                "Translate TTS returned {}",
                response.status()
            )));
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| TtsError::SynthesisError(format!("Failed to read audio: {}", e.without_url())))
    }
}

/// Split on whitespace so that no chunk exceeds `max_chars` characters.
/// A single word longer than the limit is hard-split. A zero limit is
/// treated as one character.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word.to_string();
        while word.chars().count() > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            let split_at = word
                .char_indices()
                .nth(max_chars)
                .map_or(word.len(), |(i, _)| i);
            let rest = word.split_off(split_at);
            chunks.push(word);
            word = rest;
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

impl TtsBackend for TranslateTts {
    fn synthesize(&self, text: &str, format: &AudioFormat) -> Result<Vec<u8>, TtsError> {
        if *format != AudioFormat::Mp3 {
            return Err(TtsError::UnsupportedFormat(format!(
                "{} is not available from {}; use MP3",
                format,
                self.backend_name()
            )));
        }

        let chunks = chunk_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(TtsError::SynthesisError("Nothing to speak".to_string()));
        }

        // MP3 frames concatenate into a playable stream.
        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            audio.extend(self.fetch_chunk(chunk, idx, chunks.len())?);
        }
        Ok(audio)
    }

    fn backend_name(&self) -> &str {
        "Google Translate TTS"
    }
}
