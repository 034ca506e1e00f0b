//! Backend runtime setup and orchestration.
//!
//! This module wires together configuration, shared state, and the message
//! dispatch loop that listens to frontend bridge requests.

use std::{sync::Arc, thread};

use japa_bridge::{MessageFromBackend, MessageToBackend};
use japa_chant::{ChantCounter, RecognitionAdapter, RecognitionConfig, Vocabulary};
use tokio::sync::{
    RwLock,
    mpsc::{Receiver, Sender},
};

use crate::app::AppContext;
use crate::state::State;

/// Initialize backend state and start processing frontend messages.
async fn setup_backend(rx: Receiver<MessageToBackend>, tx: Sender<MessageFromBackend>) {
    let (config, data_path) = crate::config::load_config()
        .await
        .expect("failed to load config");

    let vocabulary = match Vocabulary::new(&config.chant_patterns) {
        Ok(vocabulary) => vocabulary,
        Err(error) => {
            log::warn!("Configured chant patterns are unusable ({error}); using the defaults");
            Vocabulary::defaults()
        }
    };

    let initial_total = match crate::store::load_total(&data_path).await {
        Ok(total) => total,
        Err(error) => {
            log::warn!("Could not read the persisted chant total ({error}); starting from 0");
            0
        }
    };

    let session = RecognitionAdapter::new(RecognitionConfig {
        continuous: true,
        interim_results: true,
        language: config.language.recognition_tag().to_string(),
    });

    let request_client = reqwest::Client::new();
    let playback = crate::playback::spawn();

    let state = Arc::new(RwLock::new(State {
        config,
        data_path,
        request_client,
        playback,
        recognition_supported: true,
        counter: ChantCounter::new(vocabulary, initial_total),
        session,
    }));

    let context = Arc::new(AppContext { state, tx });
    context.consume_bridge_messages(rx).await;
}

/// Spawn the backend runtime and begin processing bridge messages.
pub fn run(rx: Receiver<MessageToBackend>, tx: Sender<MessageFromBackend>) {
    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("failed to build tokio runtime");
        runtime.block_on(async { setup_backend(rx, tx).await });
    });
}
