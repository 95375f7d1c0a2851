//! Fetch coordination.
//!
//! The coordinator owns the single logical "current fetch" slot for one
//! surface. It allocates monotonic task ids, cancels superseded work,
//! rejects stale completions and drives the backoff policy on retryable
//! failures.
//!
//! All coordinator state mutation and all variant application happen on the
//! caller's context; `&mut self` serializes them. Executors run on spawned
//! background tasks and only ever touch their cancellation token and the
//! completion channel.

use crate::backoff;
use crate::config::FetchConfig;
use crate::error::ErrorReason;
use crate::fetch::executor;
use crate::fetch::{FetchCompletion, FetchOutcome, FetchTask, TaskId};
use crate::http::{ClientFactory, ReqwestClientFactory};
use crate::surface::AdSurface;
use std::sync::{Arc, Weak};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// An in-flight fetch occupying the current slot.
struct InFlight {
    id: TaskId,
    token: tokio_util::sync::CancellationToken,
}

/// Issues fetches on behalf of one display surface.
///
/// A completion for task `t` is accepted as fresh iff `t` is at least the
/// last completed task id at the time of delivery; ties are accepted since
/// a task completes only once. Everything older is discarded without
/// touching the surface.
///
/// The coordinator holds the surface weakly. Tearing the surface down (or
/// dropping it) turns every pending completion into a harmless discard.
pub struct FetchCoordinator<S: AdSurface, F: ClientFactory = ReqwestClientFactory> {
    surface: Weak<S>,
    factory: Arc<F>,
    config: FetchConfig,
    current_task_id: u64,
    last_completed_task_id: u64,
    in_flight: Option<InFlight>,
    completion_tx: mpsc::UnboundedSender<FetchCompletion>,
    completion_rx: mpsc::UnboundedReceiver<FetchCompletion>,
}

impl<S: AdSurface> FetchCoordinator<S> {
    /// Creates a coordinator using the default reqwest-backed client
    /// factory.
    pub fn new(surface: Weak<S>, config: FetchConfig) -> Self {
        Self::with_client_factory(surface, ReqwestClientFactory, config)
    }
}

impl<S: AdSurface, F: ClientFactory> FetchCoordinator<S, F> {
    /// Creates a coordinator with a custom client factory.
    pub fn with_client_factory(surface: Weak<S>, factory: F, config: FetchConfig) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            surface,
            factory: Arc::new(factory),
            config,
            current_task_id: 0,
            last_completed_task_id: 0,
            in_flight: None,
            completion_tx,
            completion_rx,
        }
    }

    /// Starts fetching the given ad URL.
    ///
    /// Cancels any in-flight task first, then allocates the next task id
    /// and spawns an executor bound to it. Does not block the caller.
    pub fn fetch(&mut self, url: &str) {
        if let Some(superseded) = self.in_flight.take() {
            debug!(task = %superseded.id, "cancelling superseded fetch");
            superseded.token.cancel();
        }

        self.current_task_id += 1;
        let id = TaskId::from_raw(self.current_task_id);
        info!(task = %id, url, "fetching ad");

        let token = tokio_util::sync::CancellationToken::new();
        let task = FetchTask::new(id, url, self.config.user_agent());
        tokio::spawn(executor::execute(
            task,
            Arc::clone(&self.factory),
            self.config.clone(),
            token.clone(),
            self.completion_tx.clone(),
        ));

        self.in_flight = Some(InFlight { id, token });
    }

    /// Cancels the current fetch, if one is in flight.
    ///
    /// Cancellation is cooperative; the executor observes it at its next
    /// checkpoint and completes with a `Cancelled` outcome.
    pub fn cancel(&mut self) {
        if let Some(in_flight) = &self.in_flight {
            info!(task = %in_flight.id, "cancelling ad fetch");
            in_flight.token.cancel();
        }
    }

    /// Cancels in-flight work and drops the surface reference.
    ///
    /// Completions that are still pending afterwards are staleness-checked
    /// and discarded without side effects.
    pub fn teardown(&mut self) {
        self.cancel();
        self.surface = Weak::new();
    }

    /// Receives and handles the next completion.
    ///
    /// Must be driven from the surface's serialized context. Returns the
    /// completed task id, or `None` if the channel has closed.
    pub async fn process_next_completion(&mut self) -> Option<TaskId> {
        let completion = self.completion_rx.recv().await?;
        let task_id = completion.task_id;
        self.handle_completion(completion);
        Some(task_id)
    }

    /// Handles one delivered completion.
    ///
    /// Stale completions (older than the last completed task) are dropped
    /// silently; dropping the completion releases the variant's resources.
    pub fn handle_completion(&mut self, completion: FetchCompletion) {
        let FetchCompletion {
            task_id,
            outcome,
            directives,
        } = completion;

        if task_id.as_u64() < self.last_completed_task_id {
            debug!(task = %task_id, outcome = outcome.label(), "ad response is stale, discarding");
            return;
        }
        self.last_completed_task_id = self.last_completed_task_id.max(task_id.as_u64());

        if self.in_flight.as_ref().is_some_and(|f| f.id == task_id) {
            self.in_flight = None;
        }

        let Some(surface) = self.surface.upgrade() else {
            debug!(task = %task_id, "surface is gone, discarding ad response");
            return;
        };
        if surface.is_torn_down() {
            debug!(task = %task_id, "surface is torn down, discarding ad response");
            return;
        }

        // Directives from any fresh well-formed response reconfigure the
        // surface. The refresh header overrides whatever interval is set;
        // its absence disables auto-refresh rather than keeping the old
        // value.
        if let Some(directives) = &directives {
            if let Some(network_type) = &directives.network_type {
                info!(task = %task_id, %network_type, "ad network type");
            }
            surface.apply_settings(directives);
            surface.set_refresh_interval_ms(directives.refresh_interval_ms.unwrap_or(0));
        }

        match outcome {
            FetchOutcome::Success(variant) => {
                debug!(task = %task_id, kind = variant.kind(), "applying ad variant");
                match variant.apply(surface.as_ref()) {
                    Ok(()) => surface.on_fetch_succeeded(),
                    Err(reason) => surface.on_fetch_failed(reason),
                }
            }
            failure => {
                let retryable = matches!(failure, FetchOutcome::ServerErrorRetryable { .. });
                let reason = failure
                    .error_reason()
                    .unwrap_or(ErrorReason::Unspecified);
                info!(task = %task_id, outcome = failure.label(), %reason, "ad fetch failed");
                surface.on_fetch_failed(reason);

                // Backoff runs after the failure report so the first retry
                // timer is scheduled against the pre-backoff interval. Only
                // actual server errors grow the interval, one step per
                // failure.
                if retryable {
                    let next = backoff::next_refresh_interval(surface.refresh_interval_ms());
                    surface.set_refresh_interval_ms(next);
                }
            }
        }
    }

    /// Id of the most recently issued task; zero before the first fetch.
    pub fn current_task_id(&self) -> u64 {
        self.current_task_id
    }

    /// Id of the most recently completed task; zero before the first
    /// completion.
    pub fn last_completed_task_id(&self) -> u64 {
        self.last_completed_task_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::surface::tests::{RecordingSurface, SurfaceEvent};
    use crate::variant::AdVariant;

    fn coordinator(
        surface: &Arc<RecordingSurface>,
    ) -> FetchCoordinator<RecordingSurface, ReqwestClientFactory> {
        FetchCoordinator::with_client_factory(
            Arc::downgrade(surface),
            ReqwestClientFactory,
            FetchConfig::default(),
        )
    }

    fn success(task: u64) -> FetchCompletion {
        FetchCompletion::bare(
            TaskId::from_raw(task),
            FetchOutcome::Success(AdVariant::HtmlAd {
                markup: format!("<html data-task=\"{}\"/>", task),
            }),
        )
    }

    #[tokio::test]
    async fn test_stale_completion_is_discarded() {
        let surface = Arc::new(RecordingSurface::new());
        let mut coordinator = coordinator(&surface);

        coordinator.handle_completion(success(5));
        coordinator.handle_completion(success(3));

        assert_eq!(coordinator.last_completed_task_id(), 5);
        assert_eq!(
            surface.events(),
            vec![
                SurfaceEvent::HtmlContent("<html data-task=\"5\"/>".to_string()),
                SurfaceEvent::Succeeded,
            ]
        );
    }

    #[tokio::test]
    async fn test_tied_completion_is_accepted() {
        let surface = Arc::new(RecordingSurface::new());
        let mut coordinator = coordinator(&surface);

        coordinator.handle_completion(FetchCompletion::bare(
            TaskId::from_raw(2),
            FetchOutcome::NoInventory,
        ));
        // A later task may complete before an earlier one; equality with the
        // last completed id is still fresh.
        coordinator.handle_completion(success(2));

        assert_eq!(surface.events().len(), 3);
        assert_eq!(surface.events()[2], SurfaceEvent::Succeeded);
    }

    #[tokio::test]
    async fn test_completion_counter_never_regresses() {
        let surface = Arc::new(RecordingSurface::new());
        let mut coordinator = coordinator(&surface);

        coordinator.handle_completion(success(4));
        coordinator.handle_completion(success(1));
        assert_eq!(coordinator.last_completed_task_id(), 4);
    }

    #[tokio::test]
    async fn test_teardown_discards_pending_completion() {
        let surface = Arc::new(RecordingSurface::new());
        let mut coordinator = coordinator(&surface);

        coordinator.teardown();
        coordinator.handle_completion(success(1));

        assert!(surface.events().is_empty());
        // Staleness bookkeeping still advances after teardown.
        assert_eq!(coordinator.last_completed_task_id(), 1);
    }

    #[tokio::test]
    async fn test_torn_down_surface_discards_completion() {
        let surface = Arc::new(RecordingSurface::new());
        let mut coordinator = coordinator(&surface);

        surface
            .torn_down
            .store(true, std::sync::atomic::Ordering::SeqCst);
        coordinator.handle_completion(success(1));

        assert!(surface.events().is_empty());
    }

    #[tokio::test]
    async fn test_retryable_failure_reports_then_backs_off() {
        let surface = Arc::new(RecordingSurface::new());
        surface.set_refresh_interval_ms(60_000);
        let mut coordinator = coordinator(&surface);

        coordinator.handle_completion(FetchCompletion::bare(
            TaskId::from_raw(1),
            FetchOutcome::ServerErrorRetryable { status: 503 },
        ));

        assert_eq!(
            surface.events(),
            vec![SurfaceEvent::Failed(ErrorReason::ServerError)]
        );
        assert_eq!(surface.refresh_interval_ms(), 90_000);
    }

    #[tokio::test]
    async fn test_terminal_failure_does_not_back_off() {
        let surface = Arc::new(RecordingSurface::new());
        surface.set_refresh_interval_ms(60_000);
        let mut coordinator = coordinator(&surface);

        coordinator.handle_completion(FetchCompletion::bare(
            TaskId::from_raw(1),
            FetchOutcome::ServerErrorTerminal { status: 200 },
        ));

        assert_eq!(
            surface.events(),
            vec![SurfaceEvent::Failed(ErrorReason::ServerError)]
        );
        assert_eq!(surface.refresh_interval_ms(), 60_000);
    }

    #[tokio::test]
    async fn test_unclassified_error_reports_unspecified() {
        let surface = Arc::new(RecordingSurface::new());
        let mut coordinator = coordinator(&surface);

        coordinator.handle_completion(FetchCompletion::bare(
            TaskId::from_raw(1),
            FetchOutcome::Error(FetchError::Timeout),
        ));

        assert_eq!(
            surface.events(),
            vec![SurfaceEvent::Failed(ErrorReason::Unspecified)]
        );
        assert_eq!(surface.refresh_interval_ms(), 60_000);
    }

    #[tokio::test]
    async fn test_adapter_not_found_reported_via_surface() {
        let surface = Arc::new(RecordingSurface::new());
        let mut coordinator = coordinator(&surface);

        coordinator.handle_completion(FetchCompletion::bare(
            TaskId::from_raw(1),
            FetchOutcome::Success(AdVariant::LegacyCustomEvent { method_name: None }),
        ));

        assert_eq!(
            surface.events(),
            vec![SurfaceEvent::Failed(ErrorReason::AdapterNotFound)]
        );
    }
}
