//! Playback of server-returned speech audio.
//!
//! `rodio`'s output stream is tied to the thread that created it, so playback
//! runs on a dedicated plain thread that owns the stream and sink and
//! receives decoded audio bytes over a channel. Playback failures are logged
//! and never affect the rest of the application.

use std::io::Cursor;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

/// Commands accepted by the playback thread.
#[derive(Debug)]
pub enum PlaybackCommand {
    /// Decode and play the given audio bytes (MP3 as returned by the chat
    /// backend). Queued behind any audio already playing.
    Play(Vec<u8>),
}

struct PlaybackOutput {
    _stream: OutputStream,
    _stream_handle: OutputStreamHandle,
    sink: Sink,
}

impl PlaybackOutput {
    fn open() -> Result<Self, String> {
        let (stream, stream_handle) =
            OutputStream::try_default().map_err(|error| error.to_string())?;
        let sink = Sink::try_new(&stream_handle).map_err(|error| error.to_string())?;
        Ok(Self {
            _stream: stream,
            _stream_handle: stream_handle,
            sink,
        })
    }

    fn play(&self, bytes: Vec<u8>) {
        if bytes.is_empty() {
            return;
        }

        match rodio::Decoder::new(Cursor::new(bytes)) {
            Ok(source) => self.sink.append(source.convert_samples::<f32>()),
            Err(error) => log::warn!("Failed to decode reply audio: {error}"),
        }
    }
}

fn playback_loop(rx: Receiver<PlaybackCommand>) {
    // The output device is opened lazily so headless environments still run;
    // a failed open is reported once and further commands are dropped.
    let mut output: Option<PlaybackOutput> = None;
    let mut output_failed = false;

    while let Ok(command) = rx.recv() {
        match command {
            PlaybackCommand::Play(bytes) => {
                if output.is_none() && !output_failed {
                    match PlaybackOutput::open() {
                        Ok(opened) => output = Some(opened),
                        Err(error) => {
                            log::error!("No audio output device available: {error}");
                            output_failed = true;
                        }
                    }
                }

                if let Some(ref output) = output {
                    output.play(bytes);
                }
            }
        }
    }
}

/// Spawns the playback thread and returns the channel used to feed it. The
/// thread exits when every sender is dropped.
pub fn spawn() -> Sender<PlaybackCommand> {
    let (tx, rx) = channel();
    thread::spawn(move || playback_loop(rx));
    tx
}
