use crate::tts::{AudioFormat, TtsBackend, TtsError, Voice};
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// A `Voice` mapped onto a Cloud TTS neural voice name.
#[derive(Debug, Clone, Copy)]
pub struct GoogleVoice(pub Voice);

impl GoogleVoice {
    pub fn google_voice_name(&self) -> &str {
        match self.0 {
            Voice::Default | Voice::UsFemale => "en-US-Neural2-F",
            Voice::UsMale => "en-US-Neural2-D",
            Voice::UkFemale => "en-GB-Neural2-A",
            Voice::UkMale => "en-GB-Neural2-B",
        }
    }

    pub fn language_code(&self) -> &str {
        self.0.language_code()
    }
}

impl From<Voice> for GoogleVoice {
    fn from(voice: Voice) -> Self {
        GoogleVoice(voice)
    }
}

/// Google Cloud Text-to-Speech; needs an API key.
pub struct GoogleTts {
    api_key: String,
    voice: GoogleVoice,
    client: reqwest::blocking::Client,
}

impl GoogleTts {
    pub fn new(api_key: String, voice: GoogleVoice) -> Result<Self, TtsError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TtsError::SynthesisError(format!("HTTP client error: {}", e)))?;
        Ok(Self {
            api_key,
            voice,
            client,
        })
    }
}

fn google_encoding(format: &AudioFormat) -> &'static str {
    match format {
        AudioFormat::Mp3 => "MP3",
        AudioFormat::Wav => "LINEAR16",
        AudioFormat::Ogg => "OGG_OPUS",
    }
}

#[derive(Serialize)]
struct TtsRequest {
    input: TtsInput,
    voice: TtsVoice,
    #[serde(rename = "audioConfig")]
    audio_config: AudioConfig,
}

#[derive(Serialize)]
struct TtsInput {
    text: String,
}

#[derive(Serialize)]
struct TtsVoice {
    #[serde(rename = "languageCode")]
    language_code: String,
    name: String,
}

#[derive(Serialize)]
struct AudioConfig {
    #[serde(rename = "audioEncoding")]
    audio_encoding: String,
}

#[derive(Deserialize)]
struct TtsResponse {
    #[serde(rename = "audioContent")]
    audio_content: String,
}

impl GoogleTts {
    fn build_request(&self, text: &str, format: &AudioFormat) -> TtsRequest {
        TtsRequest {
            input: TtsInput {
                text: text.to_string(),
            },
            voice: TtsVoice {
                language_code: self.voice.language_code().to_string(),
                name: self.voice.google_voice_name().to_string(),
            },
            audio_config: AudioConfig {
                audio_encoding: google_encoding(format).to_string(),
            },
        }
    }
}

impl TtsBackend for GoogleTts {
    fn synthesize(&self, text: &str, format: &AudioFormat) -> Result<Vec<u8>, TtsError> {
        let request = self.build_request(text, format);

        let response = self
            .client
            .post("https://texttospeech.googleapis.com/v1/text:synthesize")
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .map_err(|e| {
                TtsError::SynthesisError(format!("HTTP request failed: {}", e.without_url()))
            })?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TtsError::SynthesisError(format!(
                "Google TTS API error: {}",
                error_text
            )));
        }

        let tts_response: TtsResponse = response.json().map_err(|e| {
            TtsError::SynthesisError(format!("Failed to parse response: {}", e.without_url()))
        })?;

        base64::engine::general_purpose::STANDARD
            .decode(&tts_response.audio_content)
            .map_err(|e| TtsError::SynthesisError(format!("Failed to decode audio: {}", e)))
    }

    fn backend_name(&self) -> &str {
        "Google Cloud TTS"
    }
}
