use std::error::Error;
use std::fmt;

pub mod gemini;

pub use gemini::GeminiRewriter;

#[derive(Debug)]
pub enum RewriteError {
    HttpClient(String),
    Request(String),
    Api(String),
    InvalidResponse(String),
    EmptyResult,
}

impl fmt::Display for RewriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewriteError::HttpClient(msg) => write!(f, "HTTP client error: {}", msg),
            RewriteError::Request(msg) => write!(f, "Rewrite request failed: {}", msg),
            RewriteError::Api(msg) => write!(f, "Language model API error: {}", msg),
            RewriteError::InvalidResponse(msg) => {
                write!(f, "Failed to parse language model response: {}", msg)
            }
            RewriteError::EmptyResult => write!(f, "Language model returned no text"),
        }
    }
}

impl Error for RewriteError {}

/// A backend that turns a prompt into a short piece of text.
///
/// Callers treat every error the same way, so implementations should map
/// timeouts, HTTP failures and empty answers onto [`RewriteError`] rather than
/// panicking.
pub trait TextRewriteService {
    fn rewrite(&self, prompt: &str) -> Result<String, RewriteError>;

    /// Get the name of this backend
    fn backend_name(&self) -> &str;
}
