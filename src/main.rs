use air_quality_dashboard::{
    config::DashboardConfig, login::open_dashboard, render::TerminalRenderer,
    sensor::SimulatedSensor, update_loop::UpdateLoop,
};
use anyhow::Context;
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    TermLogger::init(
        LevelFilter::Info,
        ConfigBuilder::new()
            .set_time_format_rfc3339()
            .set_time_offset_to_local()
            .map_err(|_| anyhow::anyhow!("Failed to set time offset to local"))?
            .build(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .context("Failed to initialize logger")?;

    if let Err(e) = run().await {
        log::error!("{e:#}");
    }

    Ok(())
}

pub async fn run() -> Result<(), anyhow::Error> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut update_loop = UpdateLoop::new();

    loop {
        let opened = tokio::select! {
            opened = open_dashboard(
                &mut lines,
                &mut stdout,
                &mut update_loop,
                DashboardConfig::default(),
                SimulatedSensor::from_os_rng(),
                TerminalRenderer,
            ) => opened?,
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to wait for Ctrl+C signal")?;
                None
            }
        };
        let Some(device) = opened else {
            break;
        };

        tokio::signal::ctrl_c()
            .await
            .context("Failed to wait for Ctrl+C signal")?;
        update_loop.stop().await?;
        log::info!("Logged out of {}", device.id);
    }

    Ok(())
}
