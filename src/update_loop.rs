use anyhow::Context;
use tokio::{
    sync::oneshot,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};

use crate::{render::Renderer, session::Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    LoggedOut,
    Active,
}

#[derive(Debug)]
struct Running {
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<Session>,
}

/// Drives at most one [`Session`] on a fixed period.
#[derive(Debug, Default)]
pub struct UpdateLoop {
    running: Option<Running>,
}

impl UpdateLoop {
    pub fn new() -> UpdateLoop {
        UpdateLoop::default()
    }

    pub fn state(&self) -> LoopState {
        match self.running {
            Some(_) => LoopState::Active,
            None => LoopState::LoggedOut,
        }
    }

    /// Enters Active with `session`. A session that is already running is
    /// stopped first, so only one ticker ever exists.
    pub async fn start<R>(&mut self, session: Session, renderer: R) -> Result<(), anyhow::Error>
    where
        R: Renderer + Send + 'static,
    {
        if let Some(previous) = self.stop().await? {
            log::info!("Replaced session for {}", previous.device().id);
        }

        log::info!(
            "Starting updates for {} every {:?}",
            session.device().id,
            session.config().tick_period
        );

        let (shutdown, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(run(session, renderer, shutdown_rx));
        self.running = Some(Running { shutdown, task });

        Ok(())
    }

    /// Returns to LoggedOut. Once this returns no further tick runs, and the
    /// final session state is handed back.
    pub async fn stop(&mut self) -> Result<Option<Session>, anyhow::Error> {
        let Some(Running { shutdown, task }) = self.running.take() else {
            return Ok(None);
        };

        // the task may already be gone if it panicked; the join below reports that
        let _ = shutdown.send(());
        let session = task.await.context("Update loop task failed")?;
        log::info!(
            "Stopped updates for {} after {} ticks",
            session.device().id,
            session.ticks()
        );

        Ok(Some(session))
    }
}

async fn run<R: Renderer>(
    mut session: Session,
    mut renderer: R,
    mut shutdown: oneshot::Receiver<()>,
) -> Session {
    session.present(&mut renderer);

    let period = session.config().tick_period;
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => break,
            _ = ticker.tick() => session.tick(&mut renderer),
        }
    }

    session
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        config::DashboardConfig,
        device::DEVICES,
        sensor::SimulatedSensor,
        session::tests::{RecordingRenderer, seeded_session},
    };
    use rand::{SeedableRng, rngs::StdRng};

    #[tokio::test(start_paused = true)]
    async fn test_ticks_on_fixed_period() {
        let mut update_loop = UpdateLoop::new();
        assert_eq!(update_loop.state(), LoopState::LoggedOut);

        update_loop
            .start(seeded_session(1), RecordingRenderer::default())
            .await
            .unwrap();
        assert_eq!(update_loop.state(), LoopState::Active);

        tokio::time::sleep(Duration::from_millis(9_500)).await;
        let session = update_loop.stop().await.unwrap().unwrap();

        assert_eq!(session.ticks(), 3);
        assert_eq!(update_loop.state(), LoopState::LoggedOut);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_tick_before_first_period() {
        let mut update_loop = UpdateLoop::new();
        update_loop
            .start(seeded_session(2), RecordingRenderer::default())
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(2_999)).await;
        let session = update_loop.stop().await.unwrap().unwrap();

        assert_eq!(session.ticks(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missed_ticks_do_not_burst() {
        let mut update_loop = UpdateLoop::new();
        update_loop
            .start(seeded_session(3), RecordingRenderer::default())
            .await
            .unwrap();

        // let the task register its ticker before the clock jumps
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_millis(10_000)).await;
        tokio::time::sleep(Duration::from_millis(1)).await;
        let session = update_loop.stop().await.unwrap().unwrap();

        assert_eq!(session.ticks(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_is_idempotent_and_halts() {
        let mut update_loop = UpdateLoop::new();
        assert!(update_loop.stop().await.unwrap().is_none());

        update_loop
            .start(seeded_session(4), RecordingRenderer::default())
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(6_500)).await;
        let session = update_loop.stop().await.unwrap().unwrap();
        let readings = *session.readings();

        tokio::time::sleep(Duration::from_secs(60)).await;

        assert_eq!(session.ticks(), 2);
        assert_eq!(session.readings(), &readings);
        assert!(update_loop.stop().await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_replaces_running_session() {
        let mut update_loop = UpdateLoop::new();
        update_loop
            .start(seeded_session(5), RecordingRenderer::default())
            .await
            .unwrap();

        let second = Session::new(
            &DEVICES[2],
            DashboardConfig::default(),
            SimulatedSensor::new(Box::new(StdRng::seed_from_u64(6))),
        );
        update_loop
            .start(second, RecordingRenderer::default())
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(3_500)).await;
        let session = update_loop.stop().await.unwrap().unwrap();

        assert_eq!(session.device().id, "DEV003");
        assert_eq!(session.ticks(), 1);
    }
}
