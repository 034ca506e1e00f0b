use japa_chant::{ChantCounter, RecognitionAdapter};

/// The core application state that holds configuration, counters, and other
/// shared resources.
///
/// This struct contains all the data that needs to be shared across async
/// tasks in the application.
///
/// It is designed to be wrapped in thread-safe, async-friendly concurrency
/// primitives (see [`SharedState`]) to allow safe concurrent reads and
/// occasional writes from multiple tasks.
#[derive(Debug)]
pub struct State {
    /// The loaded application configuration.
    pub config: japa_bridge::config::Config,
    /// Path to the directory holding the persisted chant total.
    pub data_path: std::path::PathBuf,
    /// Shared HTTP client for making efficient, pooled requests.
    pub request_client: reqwest::Client,
    /// Channel feeding the audio playback thread.
    pub playback: std::sync::mpsc::Sender<crate::playback::PlaybackCommand>,
    /// Whether the platform reported a working speech-recognition engine.
    /// Cleared once on a `RecognitionUnavailable` report; manual counting
    /// stays available either way.
    pub recognition_supported: bool,
    /// The chant counter, loaded with the persisted total at startup.
    pub counter: ChantCounter,
    /// Recognition session state machine driving the counter.
    pub session: RecognitionAdapter,
}

/// Thread-safe, async-friendly shared reference to the application [`State`].
///
/// This is the recommended way to pass state into async handlers, background
/// tasks, or any context where multiple tasks need read access (and occasional
/// write access).
pub type SharedState = std::sync::Arc<tokio::sync::RwLock<State>>;
