//! Bounded-concurrency retrieval of remote log files.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::error::LogProcessError;

/// Fixed per-request timeout applied to every fetch.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches a set of URLs with at most `parallelism` requests in flight.
pub struct LogFetcher {
    client: reqwest::Client,
    parallelism: usize,
}

impl LogFetcher {
    /// Build a fetcher with the standard per-request timeout. `parallelism`
    /// must already be validated to `[1, 30]` by the request layer.
    pub fn new(parallelism: usize) -> Result<Self, LogProcessError> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(LogProcessError::Client)?;
        Ok(Self::with_client(client, parallelism))
    }

    /// Build a fetcher around an existing client (tests use this to shrink
    /// the timeout).
    pub fn with_client(client: reqwest::Client, parallelism: usize) -> Self {
        Self { client, parallelism }
    }

    /// Fetch every URL, split each payload into lines, and merge the results
    /// in URL order.
    ///
    /// Waits for every worker to finish (success or failure) before
    /// returning. Any single failure — timeout, connection error, non-2xx —
    /// fails the whole call; no partial line set is returned.
    pub async fn fetch_lines(&self, urls: &[String]) -> Result<Vec<String>, LogProcessError> {
        let semaphore = Arc::new(Semaphore::new(self.parallelism));
        let mut workers = JoinSet::new();

        for (index, url) in urls.iter().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            let client = self.client.clone();
            let url = url.clone();
            workers.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| LogProcessError::Worker(e.to_string()))?;
                let lines = fetch_one(&client, &url).await?;
                Ok::<_, LogProcessError>((index, lines))
            });
        }

        // Drain every worker before deciding the outcome.
        let mut segments: Vec<Option<Vec<String>>> = vec![None; urls.len()];
        let mut first_error: Option<LogProcessError> = None;
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(Ok((index, lines))) => segments[index] = Some(lines),
                Ok(Err(err)) => {
                    tracing::error!(error = %err, "log file fetch failed");
                    first_error.get_or_insert(err);
                }
                Err(join_err) => {
                    first_error.get_or_insert(LogProcessError::Worker(join_err.to_string()));
                }
            }
        }

        if let Some(err) = first_error {
            return Err(err);
        }
        Ok(segments.into_iter().flatten().flatten().collect())
    }
}

async fn fetch_one(client: &reqwest::Client, url: &str) -> Result<Vec<String>, LogProcessError> {
    let fetch_err = |source| LogProcessError::Fetch { url: url.to_string(), source };
    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(fetch_err)?;
    let body = response.text().await.map_err(fetch_err)?;
    Ok(body.lines().map(str::to_owned).collect())
}
