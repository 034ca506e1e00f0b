use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};

use crate::playback::PlaybackCommand;

/// Shown instead of a reply when the exchange with the chat backend fails in
/// any way. A failed exchange never touches counter or recognition state.
const FALLBACK_REPLY: &str = "Peace. The connection is faint.";

#[derive(Debug, Serialize)]
struct ChatRequestBody<'a> {
    text: &'a str,
    language: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponseBody {
    reply: String,
    /// Base64-encoded MP3 of the spoken reply, when the backend produced one.
    #[serde(default)]
    audio: Option<String>,
}

async fn exchange(
    client: &reqwest::Client,
    backend_url: &str,
    text: &str,
    language: &str,
) -> Result<ChatResponseBody, reqwest::Error> {
    let url = format!("{}/chat", backend_url.trim_end_matches('/'));
    let response = client
        .post(url)
        .json(&ChatRequestBody { text, language })
        .send()
        .await?
        .error_for_status()?;
    response.json().await
}

/// Handles an incoming chat request (see
/// [`japa_bridge::MessageToBackend::ChatRequest`]).
pub async fn handle_chat_request(context: super::AppContextHandle, text: String) {
    let (client, backend_url, language, audio_enabled, playback) = {
        let state = context.state.read().await;
        (
            state.request_client.clone(),
            state.config.backend_url.clone(),
            state.config.language.code(),
            state.config.audio_enabled,
            state.playback.clone(),
        )
    };

    let reply = match exchange(&client, &backend_url, &text, language).await {
        Ok(response) => {
            if audio_enabled {
                if let Some(audio) = response.audio {
                    match BASE64.decode(audio) {
                        Ok(bytes) => {
                            if let Err(error) = playback.send(PlaybackCommand::Play(bytes)) {
                                log::error!("Playback thread is gone: {error}");
                            }
                        }
                        Err(error) => log::warn!("Reply audio is not valid base64: {error}"),
                    }
                }
            }
            response.reply
        }
        Err(error) => {
            log::warn!("Chat exchange failed: {}", error.without_url());
            FALLBACK_REPLY.to_string()
        }
    };

    context
        .send(japa_bridge::MessageFromBackend::ChatReply { reply })
        .await;
}
