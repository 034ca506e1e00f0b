//! Communication bridge between frontend and backend.
//!
//! This crate defines the types and protocols used to connect the user-facing
//! frontend with an asynchronous backend responsible for the chat exchange,
//! chant counting, audio playback, and persistence.
//!
//! The design is deliberately lightweight and unidirectional:
//! - The frontend sends commands (e.g., send a chat message, start chanting,
//!   request config) and forwards raw speech-recognition events from the
//!   platform engine it hosts.
//! - The backend pushes events (e.g., chat replies, chant total updates,
//!   notifications) and engine control directives.
//!
//! Communication happens over bounded [`tokio::sync::mpsc`] channels wrapped
//! in [`BridgeChannels`], providing back-pressure, async compatibility, and
//! clean separation of concerns.

pub mod config;
pub mod notification;

use japa_chant::session::{EngineEvent, RecognitionConfig};
use tokio::sync::mpsc::{self, Receiver, Sender};

/// Messages emitted by the backend to inform the frontend of state updates.
#[derive(Debug, Clone)]
pub enum MessageFromBackend {
    /// Generic message for all notifications in the application.
    NotificationMessage(notification::NotificationMessage),
    /// Response to the configuration request from the frontend.
    ConfigurationResponse(config::Config),
    /// The assistant's reply to a chat request. Audio, when present and
    /// enabled, is played by the backend and never crosses the bridge.
    ChatReply { reply: String },
    /// The chant total changed; `added` is the increment that caused it.
    /// This is the feedback hook the frontend renders on every counted chant.
    ChantTotalUpdate { added: u64, total: u64 },
    /// Whether a chanting session is currently listening.
    ChantingStateUpdate { listening: bool },
    /// An instruction for the platform speech-recognition engine hosted by
    /// the frontend.
    RecognitionControl(RecognitionControl),
}

/// Engine control directives sent to the frontend's platform layer.
#[derive(Debug, Clone)]
pub enum RecognitionControl {
    /// Start the engine with the given settings. Every event the engine
    /// produces for this session must be reported back tagged with
    /// `generation`.
    Start {
        generation: u64,
        config: RecognitionConfig,
    },
    /// Stop the engine.
    Stop,
}

/// Commands issued by the frontend to control or query the backend.
#[derive(Debug, Clone)]
pub enum MessageToBackend {
    /// Request for the application configuration.
    ConfigurationRequest,
    /// Send the user's message to the chat backend.
    ChatRequest(String),
    /// Persist the audio playback preference.
    SetAudioEnabled(bool),
    /// Begin a continuous chant-counting session.
    StartChantingRequest,
    /// End the chant-counting session.
    StopChantingRequest,
    /// A speech-recognition event from the platform engine, tagged with the
    /// session generation announced in [`RecognitionControl::Start`].
    RecognitionEvent { generation: u64, event: EngineEvent },
    /// The platform has no speech-recognition capability. Reported once;
    /// manual counting remains available.
    RecognitionUnavailable,
    /// Count one chant manually, outside any recognition session.
    ManualChantRequest,
    /// Reset the persisted chant total to zero.
    ResetChantTotalRequest,
}

/// Paired `tokio::mpsc` channels for bidirectional communication between
/// frontend and backend.
pub struct BridgeChannels {
    /// Receiver used by the frontend to get messages from the backend.
    pub frontend_rx: Receiver<MessageFromBackend>,
    /// Sender used by the frontend to send commands to the backend.
    pub frontend_tx: Sender<MessageToBackend>,

    /// Receiver used by the backend to get commands from the frontend.
    pub backend_rx: Receiver<MessageToBackend>,
    /// Sender used by the backend to send events/responses to the frontend.
    pub backend_tx: Sender<MessageFromBackend>,
}

impl BridgeChannels {
    /// Creates a new pair of bridged channels with the given buffer capacity.
    pub fn new(buffer: usize) -> Self {
        let (to_backend_tx, to_backend_rx) = mpsc::channel(buffer);
        let (to_frontend_tx, to_frontend_rx) = mpsc::channel(buffer);
        Self {
            frontend_tx: to_backend_tx,
            frontend_rx: to_frontend_rx,
            backend_rx: to_backend_rx,
            backend_tx: to_frontend_tx,
        }
    }
}

impl Default for BridgeChannels {
    fn default() -> Self {
        Self::new(64)
    }
}
