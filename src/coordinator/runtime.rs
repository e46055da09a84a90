//! Home-task marshaling for the coordinator.
//!
//! Provider futures may resolve on any worker thread; renderer and sink
//! mutations must not. [`spawn`] puts the [`QueryCoordinator`] on one tokio
//! task and funnels both submissions and provider completions through
//! channels into it, so every collaborator-mutating effect executes on that
//! single home task. Completions carry their sequence number; the coordinator
//! drops anything superseded.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::coordinator::QueryCoordinator;
use crate::providers::{ProviderError, SearchOutcome, SearchProvider};
use crate::query::Query;
use crate::render::MapRenderer;
use crate::signals::UiSignalSink;

enum Command {
    Submit(Query),
    Shutdown,
}

/// Cloneable handle for submitting queries to a running coordinator task.
#[derive(Clone)]
pub struct CoordinatorHandle {
    tx: mpsc::UnboundedSender<Command>,
}

impl CoordinatorHandle {
    /// Queue a query for submission. Returns false if the runtime is gone.
    pub fn submit(&self, query: Query) -> bool {
        self.tx.send(Command::Submit(query)).is_ok()
    }
}

/// A spawned coordinator task plus its control handle.
pub struct SearchRuntime {
    handle: CoordinatorHandle,
    join: JoinHandle<()>,
}

impl SearchRuntime {
    pub fn handle(&self) -> CoordinatorHandle {
        self.handle.clone()
    }

    /// Stop accepting commands and wait for the task to drain.
    pub async fn shutdown(self) {
        let _ = self.handle.tx.send(Command::Shutdown);
        if let Err(err) = self.join.await {
            warn!(%err, "coordinator task ended abnormally");
        }
    }
}

/// Spawn the coordinator onto its home task.
///
/// `request_timeout`, when set, bounds each provider call; expiry surfaces as
/// [`ProviderError::Timeout`] through the normal failure path. There are no
/// retries and no explicit cancel: a newer submission superseding the
/// sequence number is the only way an in-flight query stops mattering.
pub fn spawn<R, S>(
    provider: Arc<dyn SearchProvider>,
    coordinator: QueryCoordinator<R, S>,
    request_timeout: Option<Duration>,
) -> SearchRuntime
where
    R: MapRenderer + Send + 'static,
    S: UiSignalSink + Send + 'static,
{
    let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel();
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<(u64, SearchOutcome)>();

    let join = tokio::spawn(async move {
        let mut coordinator = coordinator;
        loop {
            tokio::select! {
                command = cmd_rx.recv() => match command {
                    Some(Command::Submit(query)) => {
                        let Some(seq) = coordinator.submit(&query) else {
                            continue;
                        };
                        dispatch(&provider, query, seq, request_timeout, done_tx.clone());
                    }
                    Some(Command::Shutdown) | None => break,
                },
                Some((seq, outcome)) = done_rx.recv() => {
                    coordinator.on_result(seq, outcome);
                }
            }
        }
        debug!("coordinator task stopped");
    });

    SearchRuntime {
        handle: CoordinatorHandle { tx: cmd_tx },
        join,
    }
}

fn dispatch(
    provider: &Arc<dyn SearchProvider>,
    query: Query,
    seq: u64,
    request_timeout: Option<Duration>,
    done: mpsc::UnboundedSender<(u64, SearchOutcome)>,
) {
    debug!(seq, provider = provider.name(), "dispatching query");
    let future = provider.execute(query);
    tokio::spawn(async move {
        let outcome = match request_timeout {
            Some(limit) => match tokio::time::timeout(limit, future).await {
                Ok(outcome) => outcome,
                Err(_) => Err(ProviderError::Timeout),
            },
            None => future.await,
        };
        // The runtime may already be gone; a dead receiver is fine.
        let _ = done.send((seq, outcome));
    });
}
