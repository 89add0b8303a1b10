use anyhow::Context;
use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt, Lines};

use crate::{
    config::DashboardConfig,
    device::{self, Device},
    render::Renderer,
    sensor::SimulatedSensor,
    session::Session,
    update_loop::UpdateLoop,
};

/// Prompts until a device authenticates. `None` once input runs out.
pub async fn login<R, W>(
    lines: &mut Lines<R>,
    out: &mut W,
) -> Result<Option<&'static Device>, anyhow::Error>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    loop {
        let Some(device_id) = prompt(lines, out, "Device ID: ").await? else {
            return Ok(None);
        };
        let Some(password) = prompt(lines, out, "Password: ").await? else {
            return Ok(None);
        };

        match device::authenticate(device_id.trim(), password.trim()) {
            Ok(device) => return Ok(Some(device)),
            Err(e) => log::warn!("{e}"),
        }
    }
}

/// Logs a device in and starts its session on `update_loop`. The loop is
/// only touched after authentication succeeds.
pub async fn open_dashboard<R, W, D>(
    lines: &mut Lines<R>,
    out: &mut W,
    update_loop: &mut UpdateLoop,
    config: DashboardConfig,
    sensor: SimulatedSensor,
    renderer: D,
) -> Result<Option<&'static Device>, anyhow::Error>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    D: Renderer + Send + 'static,
{
    let Some(device) = login(lines, out).await? else {
        return Ok(None);
    };
    log::info!("Logged in to {} ({})", device.name, device.location);

    update_loop
        .start(Session::new(device, config, sensor), renderer)
        .await?;

    Ok(Some(device))
}

async fn prompt<R, W>(
    lines: &mut Lines<R>,
    out: &mut W,
    label: &str,
) -> Result<Option<String>, anyhow::Error>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    out.write_all(label.as_bytes())
        .await
        .context("Failed to write prompt")?;
    out.flush().await.context("Failed to flush prompt")?;

    lines.next_line().await.context("Failed to read input")
}
