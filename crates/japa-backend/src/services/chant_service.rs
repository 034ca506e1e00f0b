//! Chant-counting session handling.
//!
//! These handlers wire the pure [`japa_chant`] state machines to the bridge:
//! start/stop requests and engine events go in, engine control directives,
//! chant total updates, and notifications come out. The persisted total is
//! written after every mutation.

use japa_bridge::{MessageFromBackend, RecognitionControl, notification::NotificationType};
use japa_chant::{EngineDirective, EngineEvent, EventOutcome};

const RECOGNITION_UNAVAILABLE_HINT: &str =
    "Speech recognition is not available here. Use manual counting instead.";

fn control_for(directive: EngineDirective, config: japa_chant::RecognitionConfig) -> RecognitionControl {
    match directive {
        EngineDirective::Start { generation } => RecognitionControl::Start { generation, config },
        EngineDirective::Stop => RecognitionControl::Stop,
    }
}

/// Writes the running total to disk. Persistence failures are logged and do
/// not interrupt counting; the in-memory total stays authoritative.
async fn persist_total(context: &super::AppContextHandle, total: u64) {
    let data_path = {
        let state = context.state.read().await;
        state.data_path.clone()
    };

    if let Err(error) = crate::store::save_total(&data_path, total).await {
        log::error!("Failed to persist chant total {total}: {error}");
    }
}

/// Handles a request to begin a continuous chanting session (see
/// [`japa_bridge::MessageToBackend::StartChantingRequest`]).
pub async fn handle_start_chanting(context: super::AppContextHandle) {
    let (directive, recognition_config, supported) = {
        let mut state = context.state.write().await;
        let supported = state.recognition_supported;
        let recognition_config = state.session.config().clone();
        let crate::state::State {
            counter, session, ..
        } = &mut *state;
        let directive = if supported { session.start(counter) } else { None };
        (directive, recognition_config, supported)
    };

    if !supported {
        context
            .send_notification(NotificationType::Warning, RECOGNITION_UNAVAILABLE_HINT)
            .await;
        return;
    }

    let Some(directive) = directive else {
        log::debug!("Chanting session is already listening");
        return;
    };

    context
        .send(MessageFromBackend::RecognitionControl(control_for(
            directive,
            recognition_config,
        )))
        .await;
    context
        .send(MessageFromBackend::ChantingStateUpdate { listening: true })
        .await;
}

/// Handles a request to end the chanting session (see
/// [`japa_bridge::MessageToBackend::StopChantingRequest`]).
pub async fn handle_stop_chanting(context: super::AppContextHandle) {
    let directive = {
        let mut state = context.state.write().await;
        state.session.stop()
    };

    if directive.is_none() {
        return;
    }

    context
        .send(MessageFromBackend::RecognitionControl(
            RecognitionControl::Stop,
        ))
        .await;
    context
        .send(MessageFromBackend::ChantingStateUpdate { listening: false })
        .await;
}

/// Handles one speech-recognition event from the platform engine (see
/// [`japa_bridge::MessageToBackend::RecognitionEvent`]).
pub async fn handle_recognition_event(
    context: super::AppContextHandle,
    generation: u64,
    event: EngineEvent,
) {
    let (outcome, recognition_config) = {
        let mut state = context.state.write().await;
        let recognition_config = state.session.config().clone();
        let crate::state::State {
            counter, session, ..
        } = &mut *state;
        (
            session.handle_event(generation, event, counter),
            recognition_config,
        )
    };

    match outcome {
        EventOutcome::Ignored => {
            log::debug!("Discarded a recognition event from a superseded session");
        }
        EventOutcome::NoChange => {}
        EventOutcome::Counted(delta) => {
            persist_total(&context, delta.total).await;
            context
                .send(MessageFromBackend::ChantTotalUpdate {
                    added: delta.added,
                    total: delta.total,
                })
                .await;
        }
        EventOutcome::Restart(directive) => {
            log::debug!("Recognition engine ended; restarting the session");
            context
                .send(MessageFromBackend::RecognitionControl(control_for(
                    directive,
                    recognition_config,
                )))
                .await;
        }
        EventOutcome::Stopped => {
            context
                .send(MessageFromBackend::ChantingStateUpdate { listening: false })
                .await;
        }
        EventOutcome::Failed(error) => {
            context
                .send_notification(NotificationType::Error, error.to_string())
                .await;
            context
                .send(MessageFromBackend::ChantingStateUpdate { listening: false })
                .await;
        }
    }
}

/// Handles the platform's one-time report that no recognition engine exists
/// (see [`japa_bridge::MessageToBackend::RecognitionUnavailable`]).
pub async fn handle_recognition_unavailable(context: super::AppContextHandle) {
    let first_report = {
        let mut state = context.state.write().await;
        let first_report = state.recognition_supported;
        state.recognition_supported = false;
        first_report
    };

    // Report once; repeated messages from the platform are harmless.
    if first_report {
        context
            .send_notification(NotificationType::Warning, RECOGNITION_UNAVAILABLE_HINT)
            .await;
    }
}

/// Handles a manual chant (see
/// [`japa_bridge::MessageToBackend::ManualChantRequest`]). Works regardless
/// of recognition availability or session state.
pub async fn handle_manual_chant(context: super::AppContextHandle) {
    let total = {
        let mut state = context.state.write().await;
        state.counter.manual_increment()
    };

    persist_total(&context, total).await;
    context
        .send(MessageFromBackend::ChantTotalUpdate { added: 1, total })
        .await;
}

/// Handles a request to reset the chant total to zero (see
/// [`japa_bridge::MessageToBackend::ResetChantTotalRequest`]).
pub async fn handle_reset_total(context: super::AppContextHandle) {
    let total = {
        let mut state = context.state.write().await;
        state.counter.reset()
    };

    persist_total(&context, total).await;
    context
        .send(MessageFromBackend::ChantTotalUpdate { added: 0, total })
        .await;
}
