use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};

pub mod announcements;
pub mod google_tts;
pub mod translate_tts;

pub use announcements::{spoken_step, spoken_tip, spoken_trip_intro};

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum Voice {
    /// Default voice
    Default,
    /// US English female voice
    UsFemale,
    /// US English male voice
    UsMale,
    /// UK English female voice
    UkFemale,
    /// UK English male voice
    UkMale,
}

impl Voice {
    pub fn language_code(&self) -> &str {
        match self {
            Voice::Default | Voice::UsFemale | Voice::UsMale => "en-US",
            Voice::UkFemale | Voice::UkMale => "en-GB",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum AudioFormat {
    /// MP3 format
    Mp3,
    /// WAV format (uncompressed)
    Wav,
    /// OGG format
    Ogg,
}

impl AudioFormat {
    pub fn file_extension(&self) -> &str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
            AudioFormat::Ogg => "ogg",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AudioFormat::Mp3 => "MP3",
            AudioFormat::Wav => "WAV",
            AudioFormat::Ogg => "OGG",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug)]
pub enum TtsError {
    SynthesisError(String),
    UnsupportedFormat(String),
    PlaybackError(String),
    FileError(String),
}

impl fmt::Display for TtsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TtsError::SynthesisError(msg) => write!(f, "Speech synthesis error: {}", msg),
            TtsError::UnsupportedFormat(msg) => write!(f, "Unsupported audio format: {}", msg),
            TtsError::PlaybackError(msg) => write!(f, "Audio playback error: {}", msg),
            TtsError::FileError(msg) => write!(f, "File operation error: {}", msg),
        }
    }
}

impl Error for TtsError {}

pub trait TtsBackend {
    /// Synthesize speech to audio data in the requested format
    fn synthesize(&self, text: &str, format: &AudioFormat) -> Result<Vec<u8>, TtsError>;

    /// Synthesize speech and play it back, blocking until done
    fn speak(&self, text: &str) -> Result<(), TtsError> {
        let audio_data = self.synthesize(text, &AudioFormat::Mp3)?;
        TtsPlayer::play_audio(&audio_data)
    }

    /// Get the name of this TTS backend
    fn backend_name(&self) -> &str;
}

/// Common TTS operations shared by all backends
pub struct TtsPlayer;

impl TtsPlayer {
    pub fn save_audio_file(audio_data: &[u8], output_path: &Path) -> Result<(), TtsError> {
        std::fs::write(output_path, audio_data).map_err(|e| {
            TtsError::FileError(format!("Failed to write {}: {}", output_path.display(), e))
        })?;

        log::info!("Audio saved to: {}", output_path.display());
        Ok(())
    }

    pub fn play_audio(audio_data: &[u8]) -> Result<(), TtsError> {
        use std::io::Cursor;
        let (_stream, stream_handle) = rodio::OutputStream::try_default().map_err(|e| {
            TtsError::PlaybackError(format!("Failed to create audio stream: {}", e))
        })?;

        let sink = rodio::Sink::try_new(&stream_handle)
            .map_err(|e| TtsError::PlaybackError(format!("Failed to create audio sink: {}", e)))?;

        let cursor = Cursor::new(audio_data.to_vec());
        let source = rodio::Decoder::new(cursor)
            .map_err(|e| TtsError::PlaybackError(format!("Failed to decode audio: {}", e)))?;

        sink.append(source);
        sink.sleep_until_end();
        Ok(())
    }
}

/// Where the `index`-th clip of a narration goes inside `dir`.
pub fn clip_path(dir: &Path, index: usize, format: &AudioFormat) -> PathBuf {
    dir.join(format!("step-{:03}.{}", index, format.file_extension()))
}

/// Speak `text`, or write it to `output_path` when one is given.
pub fn execute_tts_output(
    tts: &dyn TtsBackend,
    text: &str,
    output_path: Option<&Path>,
    audio_format: &AudioFormat,
) -> Result<(), TtsError> {
    match output_path {
        Some(path) => {
            let audio_data = tts.synthesize(text, audio_format)?;
            TtsPlayer::save_audio_file(&audio_data, path)
        }
        None => tts.speak(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Recorder {
        spoken: RefCell<Vec<String>>,
    }

    impl TtsBackend for Recorder {
        fn synthesize(&self, text: &str, _format: &AudioFormat) -> Result<Vec<u8>, TtsError> {
            Ok(text.as_bytes().to_vec())
        }

        fn speak(&self, text: &str) -> Result<(), TtsError> {
            self.spoken.borrow_mut().push(text.to_string());
            Ok(())
        }

        fn backend_name(&self) -> &str {
            "recorder"
        }
    }

    #[test]
    fn saves_instead_of_speaking_when_path_given() {
        let dir = tempfile::tempdir().unwrap();
        let path = clip_path(dir.path(), 7, &AudioFormat::Mp3);
        assert!(path.ends_with("step-007.mp3"));

        let tts = Recorder {
            spoken: RefCell::new(Vec::new()),
        };
        execute_tts_output(&tts, "Turn left", Some(&path), &AudioFormat::Mp3).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"Turn left");
        assert!(tts.spoken.borrow().is_empty());

        execute_tts_output(&tts, "Arrive", None, &AudioFormat::Mp3).unwrap();
        assert_eq!(*tts.spoken.borrow(), vec!["Arrive".to_string()]);
    }

    #[test]
    fn save_reports_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("x.mp3");
        let err = TtsPlayer::save_audio_file(b"abc", &path).unwrap_err();
        assert!(matches!(err, TtsError::FileError(_)));
    }
}
