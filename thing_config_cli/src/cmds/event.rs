use crate::{
    cmds::UpdateConfigEvent,
    overlay::{ConfigError, ConnectionOverlay, EventOverlay},
    settings::Settings,
    Msg, PrettyJson, Result,
};
use anyhow::Context;
use thing_config_client::{SensorConfig, ThingConfigClient};

pub async fn update_config_event(args: UpdateConfigEvent, settings: Settings) -> Result<Msg> {
    if args.thing_id.is_empty() {
        return Err(ConfigError::EmptyThingId.into());
    }

    let mut connection = ConnectionOverlay::from(&args.connection);
    if let Some(path) = &args.credentials_file {
        connection = connection.merge(ConnectionOverlay::from_file(path)?);
    }

    let mut event = EventOverlay::from(&args);
    if let Some(path) = &args.event_file {
        event = event.merge(EventOverlay::from_file(path)?);
    }

    let cloud = connection.resolve(settings.cloud);
    let config = event.resolve()?;

    let response = send_update(&cloud, &args.thing_id, config)
        .await
        .with_context(|| format!("failed to update config for thing {}", args.thing_id))?;

    Msg::ok(format!(
        "{}\nthing {} config updated",
        response.pretty_json()?,
        args.thing_id
    ))
}

async fn send_update(
    cloud: &thing_config_client::Settings,
    thing_id: &str,
    config: SensorConfig,
) -> Result<serde_json::Value> {
    let client = ThingConfigClient::from_settings(cloud)?;
    tracing::debug!(url = %cloud.url(), thing = thing_id, "sending config update");

    let mut session = client.connect().await?;
    // Close before inspecting the update result so the session is released
    // on both outcomes
    let update = session.update_config(thing_id, &[config]).await;
    let closed = session.close().await;
    let response = update?;
    closed?;
    Ok(response)
}
