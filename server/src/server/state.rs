//! Server application state shared across handlers

use super::events::EventBroadcaster;
use crate::clients::{ChatClient, SearchClient};
use crate::pipeline::StartupPipeline;
use crate::shutdown::ShutdownState;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Pipeline runs allowed in flight when nothing else is configured
pub const DEFAULT_MAX_CONCURRENT_RUNS: usize = 4;

/// Shared state for the server. Holds only stateless collaborators and
/// coordination handles; each pipeline run owns its own transcript.
#[derive(Clone)]
pub struct ServerAppState {
    /// Pipeline wired to the shared chat/search clients
    pub pipeline: StartupPipeline,

    /// Event broadcaster for WebSocket clients
    pub broadcaster: Arc<EventBroadcaster>,

    /// Caps how many pipeline runs execute at once
    pub run_limiter: Arc<Semaphore>,

    /// Permits the limiter was created with
    pub max_concurrent_runs: usize,

    /// Shutdown state
    pub shutdown_state: ShutdownState,
}

impl ServerAppState {
    /// Create a new server state around the given collaborators
    pub fn new(
        chat: Arc<dyn ChatClient>,
        search: Arc<dyn SearchClient>,
        shutdown_state: ShutdownState,
        max_concurrent_runs: usize,
    ) -> Self {
        let broadcaster = Arc::new(EventBroadcaster::new());
        let pipeline = StartupPipeline::with_broadcaster(chat, search, broadcaster.clone());

        let max_concurrent_runs = max_concurrent_runs.max(1);

        Self {
            pipeline,
            broadcaster,
            run_limiter: Arc::new(Semaphore::new(max_concurrent_runs)),
            max_concurrent_runs,
            shutdown_state,
        }
    }

    /// Runs currently holding a permit
    pub fn runs_in_flight(&self) -> usize {
        self.max_concurrent_runs
            .saturating_sub(self.run_limiter.available_permits())
    }
}
