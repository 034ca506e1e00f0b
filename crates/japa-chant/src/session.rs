use crate::counter::{ChantCounter, ChantDelta};

/// Settings handed to the platform recognition engine when a session starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionConfig {
    /// Keep listening across utterances instead of stopping after the first.
    pub continuous: bool,
    /// Deliver provisional transcripts before the utterance is final.
    pub interim_results: bool,
    /// BCP-47 language tag for the engine (e.g. `en-US`).
    pub language: String,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            continuous: true,
            interim_results: true,
            language: "en-US".to_string(),
        }
    }
}

/// Lifecycle state of a recognition session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Not listening; engine events are discarded.
    Idle,
    /// Listening; results are forwarded to the counter.
    Listening,
}

/// An event reported by the platform recognition engine.
///
/// Events must be tagged with the generation of the session they belong to
/// (the generation is announced in [`EngineDirective::Start`]); the adapter
/// discards events from superseded sessions, since engines do not guarantee
/// that stopping takes effect before already-queued events are delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The engine confirmed it started listening.
    Started,
    /// A transcript for the current utterance. `transcript` is the full text
    /// known so far, re-delivered (and possibly rewritten) on every update;
    /// `is_final` is true exactly once, on the last delivery.
    Result { transcript: String, is_final: bool },
    /// The engine stopped listening, either because the utterance ended or
    /// because it was told to stop.
    Ended,
    /// The engine reported an error. Benign errors (no speech detected) keep
    /// the session alive; the engine's own `Ended` triggers the restart.
    Error(EngineErrorKind),
}

/// Error categories reported by recognition engines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineErrorKind {
    /// No speech was detected before the engine's internal timeout. Harmless
    /// during continuous listening.
    NoSpeech,
    /// The user denied microphone access.
    PermissionDenied,
    /// The capture device failed.
    Device(String),
    /// Anything else the engine reports.
    Other(String),
}

impl EngineErrorKind {
    /// Whether the session should keep listening through this error.
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::NoSpeech)
    }
}

/// A fatal recognition failure surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecognitionError {
    #[error("microphone access was denied")]
    PermissionDenied,
    #[error("audio capture device failed: {0}")]
    Device(String),
    #[error("speech recognition failed: {0}")]
    Other(String),
}

impl From<EngineErrorKind> for RecognitionError {
    fn from(kind: EngineErrorKind) -> Self {
        match kind {
            EngineErrorKind::PermissionDenied => Self::PermissionDenied,
            EngineErrorKind::Device(detail) => Self::Device(detail),
            EngineErrorKind::Other(detail) => Self::Other(detail),
            EngineErrorKind::NoSpeech => Self::Other("no speech detected".to_string()),
        }
    }
}

/// An instruction for the platform layer driving the actual engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineDirective {
    /// Start (or restart) the engine. Events it produces must be tagged with
    /// `generation`.
    Start { generation: u64 },
    /// Stop the engine.
    Stop,
}

/// What happened as a result of one engine event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// The event belonged to a superseded session, or arrived while idle.
    Ignored,
    /// The event was processed but nothing needs to happen.
    NoChange,
    /// New chants were counted; persist and notify.
    Counted(ChantDelta),
    /// The engine ended mid-session; reissue the contained directive to keep
    /// listening.
    Restart(EngineDirective),
    /// The session is over (non-continuous end).
    Stopped,
    /// A fatal error ended the session; surface it to the user.
    Failed(RecognitionError),
}

/// State machine for a continuous recognition session.
///
/// The adapter never talks to an engine directly; it emits
/// [`EngineDirective`]s for the platform layer to execute and consumes the
/// events that come back. This keeps restart semantics (engines habitually
/// stop after every utterance) and stale-event filtering testable without any
/// real engine.
///
/// Every `Start` directive carries a fresh generation number. `stop()` also
/// advances the generation, so events still in flight from the stopped
/// session fail the generation check and are discarded; in particular the
/// trailing `Ended` no longer triggers an auto-restart.
#[derive(Debug, Clone)]
pub struct RecognitionAdapter {
    config: RecognitionConfig,
    state: SessionState,
    generation: u64,
}

impl RecognitionAdapter {
    pub fn new(config: RecognitionConfig) -> Self {
        Self {
            config,
            state: SessionState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The generation of the current session. Only events tagged with this
    /// value are processed.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &RecognitionConfig {
        &self.config
    }

    /// Begins listening. Returns the directive to hand to the platform layer,
    /// or `None` if the session is already listening.
    pub fn start(&mut self, counter: &mut ChantCounter) -> Option<EngineDirective> {
        if self.state == SessionState::Listening {
            return None;
        }

        self.state = SessionState::Listening;
        self.generation += 1;
        counter.on_utterance_boundary();
        Some(EngineDirective::Start {
            generation: self.generation,
        })
    }

    /// Stops listening at the user's request. Returns the directive to hand
    /// to the platform layer, or `None` if the session was already idle.
    pub fn stop(&mut self) -> Option<EngineDirective> {
        if self.state == SessionState::Idle {
            return None;
        }

        self.state = SessionState::Idle;
        // Invalidate events still in flight from the stopped session.
        self.generation += 1;
        Some(EngineDirective::Stop)
    }

    /// Processes one engine event tagged with the generation it was produced
    /// under.
    pub fn handle_event(
        &mut self,
        generation: u64,
        event: EngineEvent,
        counter: &mut ChantCounter,
    ) -> EventOutcome {
        if generation != self.generation || self.state == SessionState::Idle {
            return EventOutcome::Ignored;
        }

        match event {
            EngineEvent::Started => EventOutcome::NoChange,
            EngineEvent::Result {
                transcript,
                is_final,
            } => match counter.on_transcript_update(&transcript, is_final) {
                Some(delta) => EventOutcome::Counted(delta),
                None => EventOutcome::NoChange,
            },
            EngineEvent::Ended => {
                if self.config.continuous {
                    // Engines stop after each utterance; restart immediately
                    // under a fresh generation and utterance baseline.
                    self.generation += 1;
                    counter.on_utterance_boundary();
                    EventOutcome::Restart(EngineDirective::Start {
                        generation: self.generation,
                    })
                } else {
                    self.state = SessionState::Idle;
                    self.generation += 1;
                    EventOutcome::Stopped
                }
            }
            EngineEvent::Error(kind) => {
                if kind.is_benign() {
                    EventOutcome::NoChange
                } else {
                    self.state = SessionState::Idle;
                    self.generation += 1;
                    EventOutcome::Failed(kind.into())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::Vocabulary;

    fn setup() -> (RecognitionAdapter, ChantCounter) {
        (
            RecognitionAdapter::new(RecognitionConfig::default()),
            ChantCounter::new(Vocabulary::defaults(), 0),
        )
    }

    fn result(transcript: &str, is_final: bool) -> EngineEvent {
        EngineEvent::Result {
            transcript: transcript.to_string(),
            is_final,
        }
    }

    #[test]
    fn start_emits_directive_with_fresh_generation() {
        let (mut adapter, mut counter) = setup();
        let directive = adapter.start(&mut counter).unwrap();
        assert_eq!(directive, EngineDirective::Start { generation: 1 });
        assert_eq!(adapter.state(), SessionState::Listening);

        // Starting again while listening is a no-op.
        assert_eq!(adapter.start(&mut counter), None);
        assert_eq!(adapter.generation(), 1);
    }

    #[test]
    fn results_flow_into_the_counter() {
        let (mut adapter, mut counter) = setup();
        adapter.start(&mut counter);

        let outcome = adapter.handle_event(1, EngineEvent::Started, &mut counter);
        assert_eq!(outcome, EventOutcome::NoChange);

        let outcome = adapter.handle_event(1, result("hare krishna", false), &mut counter);
        assert_eq!(
            outcome,
            EventOutcome::Counted(ChantDelta { added: 2, total: 2 })
        );

        let outcome = adapter.handle_event(1, result("hare krishna", true), &mut counter);
        assert_eq!(outcome, EventOutcome::NoChange);
    }

    #[test]
    fn end_while_continuous_restarts_with_new_generation() {
        let (mut adapter, mut counter) = setup();
        adapter.start(&mut counter);
        adapter.handle_event(1, result("hare", false), &mut counter);

        let outcome = adapter.handle_event(1, EngineEvent::Ended, &mut counter);
        assert_eq!(
            outcome,
            EventOutcome::Restart(EngineDirective::Start { generation: 2 })
        );
        assert_eq!(adapter.state(), SessionState::Listening);

        // The restart reset the utterance baseline, so the same words count
        // again as a fresh utterance.
        let outcome = adapter.handle_event(2, result("hare", false), &mut counter);
        assert_eq!(
            outcome,
            EventOutcome::Counted(ChantDelta { added: 1, total: 2 })
        );
    }

    #[test]
    fn end_while_not_continuous_goes_idle() {
        let mut adapter = RecognitionAdapter::new(RecognitionConfig {
            continuous: false,
            ..RecognitionConfig::default()
        });
        let mut counter = ChantCounter::new(Vocabulary::defaults(), 0);

        adapter.start(&mut counter);
        let outcome = adapter.handle_event(1, EngineEvent::Ended, &mut counter);
        assert_eq!(outcome, EventOutcome::Stopped);
        assert_eq!(adapter.state(), SessionState::Idle);
    }

    #[test]
    fn stop_suppresses_auto_restart_and_stale_events() {
        let (mut adapter, mut counter) = setup();
        adapter.start(&mut counter);
        adapter.handle_event(1, result("hare", false), &mut counter);

        assert_eq!(adapter.stop(), Some(EngineDirective::Stop));
        assert_eq!(adapter.state(), SessionState::Idle);
        assert_eq!(adapter.stop(), None);

        // The engine's trailing events carry the old generation and must not
        // count or restart anything.
        let outcome = adapter.handle_event(1, result("hare krishna", false), &mut counter);
        assert_eq!(outcome, EventOutcome::Ignored);
        let outcome = adapter.handle_event(1, EngineEvent::Ended, &mut counter);
        assert_eq!(outcome, EventOutcome::Ignored);
        assert_eq!(counter.total(), 1);
    }

    #[test]
    fn stale_events_after_restart_are_ignored() {
        let (mut adapter, mut counter) = setup();
        adapter.start(&mut counter);
        adapter.stop();
        adapter.start(&mut counter);
        assert_eq!(adapter.generation(), 3);

        // An event from the first session arrives late.
        let outcome = adapter.handle_event(1, result("govinda", true), &mut counter);
        assert_eq!(outcome, EventOutcome::Ignored);
        assert_eq!(counter.total(), 0);
    }

    #[test]
    fn no_speech_error_keeps_listening() {
        let (mut adapter, mut counter) = setup();
        adapter.start(&mut counter);

        let outcome = adapter.handle_event(
            1,
            EngineEvent::Error(EngineErrorKind::NoSpeech),
            &mut counter,
        );
        assert_eq!(outcome, EventOutcome::NoChange);
        assert_eq!(adapter.state(), SessionState::Listening);

        // The engine ends afterwards and the session restarts as usual.
        let outcome = adapter.handle_event(1, EngineEvent::Ended, &mut counter);
        assert!(matches!(outcome, EventOutcome::Restart(_)));
    }

    #[test]
    fn fatal_error_ends_the_session() {
        let (mut adapter, mut counter) = setup();
        adapter.start(&mut counter);

        let outcome = adapter.handle_event(
            1,
            EngineEvent::Error(EngineErrorKind::PermissionDenied),
            &mut counter,
        );
        assert_eq!(
            outcome,
            EventOutcome::Failed(RecognitionError::PermissionDenied)
        );
        assert_eq!(adapter.state(), SessionState::Idle);

        // Later events from the dead session are discarded.
        let outcome = adapter.handle_event(1, EngineEvent::Ended, &mut counter);
        assert_eq!(outcome, EventOutcome::Ignored);
    }

    #[test]
    fn full_utterance_stream_example() {
        let (mut adapter, mut counter) = setup();
        adapter.start(&mut counter);

        adapter.handle_event(1, result("hare", false), &mut counter);
        adapter.handle_event(1, result("hare krishna", false), &mut counter);
        adapter.handle_event(1, result("hare krishna hare", true), &mut counter);
        assert_eq!(counter.total(), 3);

        adapter.handle_event(1, EngineEvent::Ended, &mut counter);
        adapter.handle_event(2, result("govinda ram", true), &mut counter);
        assert_eq!(counter.total(), 5);
    }
}
