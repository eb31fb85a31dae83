use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::sync::mpsc::{
    UnboundedReceiver, UnboundedSender, error::TryRecvError, unbounded_channel,
};
use tokio::task::JoinHandle;

use crate::error::{AppError, AppResult};

use super::service::CatalogService;
use super::types::{ListingRequest, ListingResult};

#[derive(Debug, Clone, PartialEq)]
pub enum ListingEvent {
    Completed {
        generation: u64,
        result: ListingResult,
    },
    Failed {
        generation: u64,
        message: String,
        retryable: bool,
    },
}

impl ListingEvent {
    pub fn generation(&self) -> u64 {
        match self {
            Self::Completed { generation, .. } | Self::Failed { generation, .. } => *generation,
        }
    }
}

/// Issues listing queries and tags each with a monotonically increasing
/// generation so late answers to superseded requests can be told apart.
pub struct ListingEngine {
    service: Arc<dyn CatalogService>,
    event_tx: UnboundedSender<ListingEvent>,
    event_rx: UnboundedReceiver<ListingEvent>,
    next_generation: u64,
    cancel_superseded: bool,
    in_flight: Option<JoinHandle<()>>,
    runtime: EngineRuntime,
}

struct EngineRuntime {
    _owned: Option<Runtime>,
    handle: Handle,
}

impl EngineRuntime {
    fn new() -> AppResult<Self> {
        if let Ok(handle) = Handle::try_current() {
            return Ok(Self {
                _owned: None,
                handle,
            });
        }

        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .thread_name("storefront-catalog")
            .build()
            .map_err(|source| {
                AppError::io_with_context(source, "failed to start catalog runtime")
            })?;
        let handle = runtime.handle().clone();
        Ok(Self {
            _owned: Some(runtime),
            handle,
        })
    }
}

impl ListingEngine {
    pub fn new(service: Arc<dyn CatalogService>) -> AppResult<Self> {
        let (event_tx, event_rx) = unbounded_channel();
        Ok(Self {
            service,
            event_tx,
            event_rx,
            next_generation: 0,
            cancel_superseded: true,
            in_flight: None,
            runtime: EngineRuntime::new()?,
        })
    }

    /// When set, submitting a request aborts the one still in flight.
    pub fn with_cancel_superseded(mut self, cancel: bool) -> Self {
        self.cancel_superseded = cancel;
        self
    }

    pub fn latest_generation(&self) -> u64 {
        self.next_generation
    }

    pub fn submit(&mut self, request: ListingRequest) -> u64 {
        self.next_generation = self.next_generation.saturating_add(1);
        let generation = self.next_generation;

        if self.cancel_superseded
            && let Some(previous) = self.in_flight.take()
            && !previous.is_finished()
        {
            tracing::debug!(generation = generation - 1, "aborting superseded listing query");
            previous.abort();
        }

        let query = self.service.list_products(request);
        let event_tx = self.event_tx.clone();
        let task = self.runtime.handle.spawn(async move {
            let event = match AssertUnwindSafe(query).catch_unwind().await {
                Ok(Ok(result)) => ListingEvent::Completed { generation, result },
                Ok(Err(err)) => {
                    tracing::warn!(generation, error = %err, "listing query failed");
                    ListingEvent::Failed {
                        generation,
                        retryable: err.is_retryable(),
                        message: err.to_string(),
                    }
                }
                // A panicking service must still answer, or the view stays loading.
                Err(_) => {
                    tracing::error!(generation, "listing query panicked");
                    ListingEvent::Failed {
                        generation,
                        retryable: true,
                        message: "catalog query panicked".to_string(),
                    }
                }
            };
            let _ = event_tx.send(event);
        });
        self.in_flight = Some(task);

        generation
    }

    pub fn drain_events(&mut self) -> Vec<ListingEvent> {
        let mut drained = Vec::new();

        loop {
            match self.event_rx.try_recv() {
                Ok(event) => drained.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }

        drained
    }

    /// Waits for the next query outcome. The engine holds a sender itself,
    /// so this only returns `None` if the channel is closed externally.
    pub async fn next_event(&mut self) -> Option<ListingEvent> {
        self.event_rx.recv().await
    }
}

impl Drop for ListingEngine {
    fn drop(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }
}
