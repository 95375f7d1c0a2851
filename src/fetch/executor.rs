//! Fetch execution.
//!
//! One executor performs exactly one HTTP GET on a background task,
//! classifies the response and reports a [`FetchCompletion`] back to the
//! coordinator's channel. The HTTP client is built per task and dropped on
//! every exit path, releasing its connection resources.
//!
//! Cancellation is cooperative. The token is polled at two checkpoints,
//! immediately before dispatching the request and after the response has
//! been received, and additionally races the in-flight request itself.
//! Cancellation observed anywhere here yields a normal `Cancelled` outcome,
//! never an error. A task past its last checkpoint runs to completion and
//! relies on the coordinator's staleness check to be discarded.

use crate::classify::{classify, parse_directives};
use crate::config::FetchConfig;
use crate::fetch::{FetchCompletion, FetchOutcome, FetchTask};
use crate::http::{AdHttpClient, ClientFactory};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

/// Runs one fetch task to completion and delivers its result.
///
/// Spawned by the coordinator; never retries internally. Retry cadence is
/// owned by the coordinator and the backoff policy.
pub(crate) async fn execute<F>(
    task: FetchTask,
    factory: Arc<F>,
    config: FetchConfig,
    token: CancellationToken,
    completions: UnboundedSender<FetchCompletion>,
) where
    F: ClientFactory,
{
    let task_id = task.id;
    let completion = match factory.create(&config) {
        Ok(client) => run_fetch(task, client, token).await,
        Err(error) => {
            warn!(task = %task_id, %error, "could not build HTTP client for fetch");
            FetchCompletion::bare(task_id, FetchOutcome::Error(error))
        }
    };
    // The coordinator may already be gone; its absence discards the result.
    let _ = completions.send(completion);
}

/// Performs the GET and maps the response to an outcome.
#[instrument(skip(task, client, token), fields(task = %task.id))]
pub(crate) async fn run_fetch<C>(
    task: FetchTask,
    client: C,
    token: CancellationToken,
) -> FetchCompletion
where
    C: AdHttpClient,
{
    // Checkpoint: the task may have been superseded before dispatch.
    if token.is_cancelled() {
        debug!("fetch cancelled before request dispatch");
        return FetchCompletion::bare(task.id, FetchOutcome::Cancelled);
    }

    let response = tokio::select! {
        biased;

        _ = token.cancelled() => {
            debug!("fetch cancelled mid-flight");
            return FetchCompletion::bare(task.id, FetchOutcome::Cancelled);
        }

        result = client.get(&task.url, &task.user_agent) => match result {
            Ok(response) => response,
            Err(error) => {
                warn!(%error, elapsed_ms = task.elapsed().as_millis() as u64, "ad request failed");
                return FetchCompletion::bare(task.id, FetchOutcome::Error(error));
            }
        },
    };

    // Checkpoint: response received, nothing applied yet.
    if token.is_cancelled() {
        debug!("fetch cancelled after response receipt");
        return FetchCompletion::bare(task.id, FetchOutcome::Cancelled);
    }

    // Client and server HTTP errors back off; other unexpected statuses
    // and responses without an entity fail without backoff.
    if response.status >= 400 {
        debug!(status = response.status, "ad server returned error status");
        return FetchCompletion::bare(
            task.id,
            FetchOutcome::ServerErrorRetryable {
                status: response.status,
            },
        );
    }
    if response.status != 200 {
        debug!(status = response.status, "ad server returned unexpected status");
        return FetchCompletion::bare(
            task.id,
            FetchOutcome::ServerErrorTerminal {
                status: response.status,
            },
        );
    }
    let Some(body) = response.body.as_deref() else {
        debug!("ad server returned an empty response");
        return FetchCompletion::bare(task.id, FetchOutcome::ServerErrorTerminal { status: 200 });
    };

    let directives = match parse_directives(&response.headers) {
        Ok(directives) => directives,
        Err(error) => {
            warn!(%error, "ad response carried malformed headers");
            return FetchCompletion::bare(task.id, FetchOutcome::Error(error));
        }
    };

    let outcome = classify(&response.headers, body);
    debug!(
        outcome = outcome.label(),
        elapsed_ms = task.elapsed().as_millis() as u64,
        "fetch classified"
    );

    FetchCompletion {
        task_id: task.id,
        outcome,
        directives: Some(directives),
    }
}
