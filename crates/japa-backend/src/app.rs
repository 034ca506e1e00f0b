//! Application context and message dispatching utilities.
//!
//! The context contains the shared state and provides helpers for sending
//! responses and notifications back to the frontend bridge.

use std::sync::Arc;

use japa_bridge::{MessageFromBackend, MessageToBackend};
use tokio::sync::mpsc::{Receiver, Sender};

use crate::services;
use crate::state::SharedState;

/// Shared application context passed to services and message handlers.
pub(crate) struct AppContext {
    /// Mutable runtime application state shared across services.
    pub state: SharedState,
    /// Outbound channel to the frontend bridge.
    pub tx: Sender<MessageFromBackend>,
}

impl AppContext {
    /// Read and dispatch messages from the frontend bridge until it closes.
    pub async fn consume_bridge_messages(self: &Arc<Self>, mut rx: Receiver<MessageToBackend>) {
        while let Some(message) = rx.recv().await {
            log::debug!("Got a frontend message: {message:?}");
            self.dispatch_message(message).await;
        }
    }

    /// Dispatches the received message from frontend down to individual
    /// service handlers.
    async fn dispatch_message(self: &Arc<Self>, message: MessageToBackend) {
        match message {
            MessageToBackend::ConfigurationRequest => {
                services::config_service::handle_config_request(self.clone()).await;
            }
            MessageToBackend::SetAudioEnabled(enabled) => {
                services::config_service::handle_set_audio_enabled(self.clone(), enabled).await;
            }
            MessageToBackend::ChatRequest(text) => {
                services::chat_service::handle_chat_request(self.clone(), text).await;
            }
            MessageToBackend::StartChantingRequest => {
                services::chant_service::handle_start_chanting(self.clone()).await;
            }
            MessageToBackend::StopChantingRequest => {
                services::chant_service::handle_stop_chanting(self.clone()).await;
            }
            MessageToBackend::RecognitionEvent { generation, event } => {
                services::chant_service::handle_recognition_event(self.clone(), generation, event)
                    .await;
            }
            MessageToBackend::RecognitionUnavailable => {
                services::chant_service::handle_recognition_unavailable(self.clone()).await;
            }
            MessageToBackend::ManualChantRequest => {
                services::chant_service::handle_manual_chant(self.clone()).await;
            }
            MessageToBackend::ResetChantTotalRequest => {
                services::chant_service::handle_reset_total(self.clone()).await;
            }
        }
    }

    /// Send a message to the frontend bridge.
    pub async fn send(&self, message: MessageFromBackend) {
        self.tx
            .send(message)
            .await
            .expect("failed to send message to frontend");
    }

    /// Send a notification message to the frontend bridge.
    pub async fn send_notification(
        &self,
        notification_type: japa_bridge::notification::NotificationType,
        content: impl Into<String>,
    ) {
        self.send(MessageFromBackend::NotificationMessage(
            japa_bridge::notification::NotificationMessage {
                notification_type,
                message: content.into(),
            },
        ))
        .await;
    }
}
