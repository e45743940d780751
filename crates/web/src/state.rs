use std::sync::Arc;

use feedback_client::ReviewBackend;
use feedback_ui::dashboard::AdminDashboard;

use crate::config::WebConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<WebConfig>,
    /// Backend used by the submission form and the health check.
    pub backend: Arc<dyn ReviewBackend>,
    /// Dashboard shared with the background poller.
    pub dashboard: Arc<AdminDashboard>,
}

impl AppState {
    pub fn new(config: WebConfig, backend: Arc<dyn ReviewBackend>) -> Self {
        let dashboard = Arc::new(AdminDashboard::new(Arc::clone(&backend)));
        Self {
            config: Arc::new(config),
            backend,
            dashboard,
        }
    }
}
