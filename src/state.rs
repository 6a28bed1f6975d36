use anyhow::Result;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::simulation::{Session, SessionRegistry};

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub dashboard: Arc<Dashboard>,
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    pub fn new(cfg: Config) -> Result<Self> {
        let dashboard = Dashboard::new(
            cfg.series_params()?,
            cfg.catalog()?,
            cfg.campus.solar_capacity_kw,
        )?;
        let sessions = cfg.sessions.registry(cfg.generation.seed);

        info!(
            start_date = %cfg.generation.start_date,
            day_count = cfg.generation.day_count,
            buildings = dashboard.catalog().len(),
            seeded = cfg.generation.seed.is_some(),
            max_sessions = sessions.max_sessions(),
            "dashboard ready"
        );

        Ok(Self {
            cfg: Arc::new(cfg),
            dashboard: Arc::new(dashboard),
            sessions: Arc::new(sessions),
        })
    }

    /// Session for `id`, or the shared default session when none is given.
    pub fn session(&self, id: Option<Uuid>) -> Arc<Session> {
        self.sessions.session(id.unwrap_or_else(Uuid::nil))
    }

    /// Periodically drop sessions idle past the configured timeout.
    pub fn spawn_session_sweeper(&self) -> JoinHandle<()> {
        let sessions = Arc::clone(&self.sessions);
        let period = self.cfg.sessions.sweep_interval();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                sessions.sweep();
            }
        })
    }
}
