use japa_bridge::notification::NotificationType;

/// Handles an incoming configuration request (see
/// [`japa_bridge::MessageToBackend::ConfigurationRequest`]).
pub async fn handle_config_request(context: super::AppContextHandle) {
    let config = {
        let state = context.state.read().await;
        state.config.clone()
    };
    context
        .send(japa_bridge::MessageFromBackend::ConfigurationResponse(
            config,
        ))
        .await;
}

/// Handles an audio preference toggle and persists it to config. When
/// disabled, server-returned speech audio is never played.
pub async fn handle_set_audio_enabled(context: super::AppContextHandle, enabled: bool) {
    let config = {
        let mut state = context.state.write().await;
        state.config.audio_enabled = enabled;
        state.config.clone()
    };

    if let Err(error) = crate::config::save_config(&config).await {
        log::error!("Failed to persist the audio preference: {error}");
        context
            .send_notification(
                NotificationType::Warning,
                "Could not save the audio preference; it will reset on restart.",
            )
            .await;
    }

    context
        .send(japa_bridge::MessageFromBackend::ConfigurationResponse(
            config,
        ))
        .await;
}
