//! Terminal frontend for the companion.
//!
//! Two modes mirror the two halves of the application:
//! - *Reflection*: typed lines are chat messages; replies are printed (and
//!   spoken by the backend when audio is enabled).
//! - *Mantra*: the terminal stands in for the platform speech source. Typed
//!   lines are forwarded to the backend as recognition results tagged with
//!   the session generation the backend announced; a line ending in `...` is
//!   forwarded as a provisional (non-final) transcript, the way a real
//!   engine delivers interim results.
//!
//! The frontend holds no counting state of its own; it renders whatever the
//! backend pushes over the bridge.

use std::io::{BufRead, IsTerminal};
use std::sync::{Arc, Mutex};
use std::thread;

use japa_bridge::{MessageFromBackend, MessageToBackend, RecognitionControl, notification};
use japa_chant::EngineEvent;
use tokio::sync::mpsc::{Receiver, Sender};

const GREETING: &str = "Radhe Radhe. I am here. Let us find stillness together.";

const HELP: &str = "\
Commands:
  /mantra        start a chanting session (speech results are typed lines)
  /reflect       stop chanting and return to the conversation
  /count         count one chant by hand
  /reset         reset the chant total to zero
  /audio on|off  toggle spoken replies
  /quit          leave";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Reflection,
    Mantra,
}

/// The state the terminal keeps while acting as the platform recognition
/// engine: the generation of the session the backend asked it to run, if any.
#[derive(Debug, Default)]
struct RecognitionHost {
    generation: Option<u64>,
}

fn render_message(message: MessageFromBackend, host: &Arc<Mutex<RecognitionHost>>) {
    match message {
        MessageFromBackend::ChatReply { reply } => println!("\nKrishna: {reply}\n"),
        MessageFromBackend::ChantTotalUpdate { added, total } => {
            if added > 0 {
                println!("  chants: {total} (+{added})");
            } else {
                println!("  chants: {total}");
            }
        }
        MessageFromBackend::ChantingStateUpdate { listening } => {
            if listening {
                println!("Listening for your chant. End a line with ... to keep it provisional.");
            } else {
                println!("No longer listening.");
            }
        }
        MessageFromBackend::RecognitionControl(control) => {
            let mut host = host.lock().expect("recognition host lock poisoned");
            match control {
                RecognitionControl::Start { generation, config } => {
                    log::debug!("Hosting recognition session {generation} ({})", config.language);
                    host.generation = Some(generation);
                }
                RecognitionControl::Stop => host.generation = None,
            }
        }
        MessageFromBackend::ConfigurationResponse(config) => {
            log::debug!("Got configuration: {config:?}");
            println!(
                "(audio {}, language {})",
                if config.audio_enabled { "on" } else { "off" },
                config.language.code()
            );
        }
        MessageFromBackend::NotificationMessage(notification) => {
            let label = match notification.notification_type {
                notification::NotificationType::Info => "info",
                notification::NotificationType::Success => "ok",
                notification::NotificationType::Warning => "warning",
                notification::NotificationType::Error => "error",
            };
            println!("[{label}] {}", notification.message);
        }
    }
}

/// Splits a typed line into a transcript and its finality flag: a trailing
/// `...` marks the transcript as provisional.
fn line_to_result(line: &str) -> (String, bool) {
    match line.strip_suffix("...") {
        Some(interim) => (interim.trim_end().to_string(), false),
        None => (line.to_string(), true),
    }
}

fn send(tx: &Sender<MessageToBackend>, message: MessageToBackend) {
    tx.blocking_send(message)
        .expect("failed to send message to backend");
}

/// Runs the terminal loop until the user quits or stdin closes.
pub fn run(
    mut rx: Receiver<MessageFromBackend>,
    tx: Sender<MessageToBackend>,
) -> anyhow::Result<()> {
    let host = Arc::new(Mutex::new(RecognitionHost::default()));
    let render_host = host.clone();
    thread::spawn(move || {
        while let Some(message) = rx.blocking_recv() {
            render_message(message, &render_host);
        }
    });

    send(&tx, MessageToBackend::ConfigurationRequest);
    if !std::io::stdin().is_terminal() {
        // No interactive terminal means no speech source to simulate.
        send(&tx, MessageToBackend::RecognitionUnavailable);
    }

    println!("{GREETING}\n{HELP}\n");

    let mut mode = Mode::Reflection;
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            "/quit" => break,
            "/help" => println!("{HELP}"),
            "/count" => send(&tx, MessageToBackend::ManualChantRequest),
            "/reset" => send(&tx, MessageToBackend::ResetChantTotalRequest),
            "/audio on" => send(&tx, MessageToBackend::SetAudioEnabled(true)),
            "/audio off" => send(&tx, MessageToBackend::SetAudioEnabled(false)),
            "/mantra" => {
                mode = Mode::Mantra;
                send(&tx, MessageToBackend::StartChantingRequest);
            }
            "/reflect" => {
                mode = Mode::Reflection;
                send(&tx, MessageToBackend::StopChantingRequest);
            }
            _ if line.starts_with('/') => println!("Unknown command.\n{HELP}"),
            text => match mode {
                Mode::Reflection => send(&tx, MessageToBackend::ChatRequest(text.to_string())),
                Mode::Mantra => {
                    let generation = host.lock().expect("recognition host lock poisoned").generation;
                    match generation {
                        Some(generation) => {
                            let (transcript, is_final) = line_to_result(text);
                            send(
                                &tx,
                                MessageToBackend::RecognitionEvent {
                                    generation,
                                    event: EngineEvent::Result {
                                        transcript,
                                        is_final,
                                    },
                                },
                            );
                        }
                        None => {
                            println!("Not listening. /mantra starts a session, /count counts by hand.");
                        }
                    }
                }
            },
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_line_is_a_final_transcript() {
        assert_eq!(
            line_to_result("hare krishna"),
            ("hare krishna".to_string(), true)
        );
    }

    #[test]
    fn trailing_dots_mark_an_interim_transcript() {
        assert_eq!(line_to_result("hare..."), ("hare".to_string(), false));
        assert_eq!(
            line_to_result("hare krishna ..."),
            ("hare krishna".to_string(), false)
        );
    }
}
