use serde::{Deserialize, Serialize};

/// Language the companion replies in. Forwarded to the chat backend with
/// every request and used to pick the recognition engine's language tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English. Default value.
    #[default]
    #[serde(alias = "english")]
    En,
    /// Hindi.
    #[serde(alias = "hindi")]
    Hi,
}

impl Language {
    /// Two-letter code sent to the chat backend.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
        }
    }

    /// BCP-47 tag handed to the speech-recognition engine.
    pub fn recognition_tag(&self) -> &'static str {
        match self {
            Language::En => "en-US",
            Language::Hi => "hi-IN",
        }
    }
}

/// Global application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Base URL of the chat backend service.
    pub backend_url: String,
    /// Language for replies and speech recognition.
    pub language: Language,
    /// Whether server-returned speech audio is played. Persisted on every
    /// toggle.
    pub audio_enabled: bool,
    /// Target sound patterns counted during chanting. An empty or invalid
    /// list falls back to the built-in vocabulary.
    pub chant_patterns: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: "https://krishna-ai-temple.onrender.com".to_string(),
            language: Language::default(),
            audio_enabled: true,
            chant_patterns: japa_chant::DEFAULT_PATTERNS
                .iter()
                .map(|pattern| pattern.to_string())
                .collect(),
        }
    }
}
