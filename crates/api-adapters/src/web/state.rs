use std::sync::Arc;

use domains::ports::{DataSession, SessionFactory};

use crate::metrics::HttpMetrics;

/// Shared by every request. Each request opens its own session.
#[derive(Clone)]
pub struct AppState {
    sessions: Arc<dyn SessionFactory>,
    metrics: Arc<HttpMetrics>,
}

impl AppState {
    pub fn new(sessions: Arc<dyn SessionFactory>) -> Self {
        Self {
            sessions,
            metrics: Arc::new(HttpMetrics::new()),
        }
    }

    pub fn open_session(&self) -> Box<dyn DataSession> {
        self.sessions.open_session()
    }

    pub fn metrics(&self) -> &HttpMetrics {
        &self.metrics
    }
}
