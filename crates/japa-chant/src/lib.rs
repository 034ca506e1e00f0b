//! Chant counting primitives for live speech transcripts.
//!
//! This crate provides the state handling needed to tally devotional chants
//! from a continuously updating speech transcript. It is split into three
//! pieces:
//! - [`vocabulary`] turns a list of target sound patterns into a matcher that
//!   counts occurrences in arbitrary text.
//! - [`counter`] attributes new matches to a running total exactly once per
//!   utterance, across repeated interim deliveries of the same transcript.
//! - [`session`] models the lifecycle of a continuous recognition session,
//!   including automatic restarts after the engine stops on its own.
//!
//! Everything here is synchronous and free of IO so the counting behavior can
//! be tested in isolation from recognition timing.

pub mod counter;
pub mod session;
pub mod vocabulary;

pub use counter::{ChantCounter, ChantDelta};
pub use session::{
    EngineDirective, EngineErrorKind, EngineEvent, EventOutcome, RecognitionAdapter,
    RecognitionConfig, RecognitionError, SessionState,
};
pub use vocabulary::{DEFAULT_PATTERNS, Vocabulary, VocabularyError};
