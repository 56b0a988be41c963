//! Blocking HTTP fetch of the CSV feed.
//!
//! Each fetch runs on its own detached `std::thread` with a
//! `reqwest::blocking` client, so the TUI needs no async runtime. Outcomes
//! travel back to the render loop over a `flume` channel.

use hbl_core::csv::{parse_rows, Row};

/// Result of one fetch, tagged with the request token issued by
/// [`hbl_core::state::FetchState::begin`]. Settlement drops stale tokens.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub token: u64,
    pub result: Result<Vec<Row>, String>,
}

/// Reusable blocking client + source URL.
#[derive(Clone)]
pub struct CsvClient {
    client: reqwest::blocking::Client,
    url: String,
}

impl CsvClient {
    pub fn new(url: &str) -> Self {
        // No request timeout: a hung fetch stays in flight until it settles
        // or the process exits. A later refresh simply outruns it.
        let client = reqwest::blocking::Client::builder()
            .timeout(None)
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());
        Self {
            client,
            url: url.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// GET the feed and parse it.
    ///
    /// Transport failures and non-success statuses collapse into a single
    /// message string; malformed CSV never fails here, it degrades into
    /// zero/empty fields inside [`parse_rows`].
    pub fn fetch_rows(&self) -> Result<Vec<Row>, String> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| format!("GET {}: {e}", self.url))?;
        if !resp.status().is_success() {
            return Err(format!("GET {}: HTTP {}", self.url, resp.status()));
        }
        let body = resp
            .text()
            .map_err(|e| format!("GET {} body: {e}", self.url))?;
        Ok(parse_rows(&body))
    }
}

/// Run one fetch on a detached thread, delivering the outcome over `tx`.
///
/// Overlapping fetches are allowed; the settlement token decides which one
/// wins, so no cancellation is needed.
pub fn spawn_fetch(client: CsvClient, token: u64, tx: flume::Sender<FetchOutcome>) {
    std::thread::spawn(move || {
        tracing::debug!(token, url = client.url.as_str(), "fetch started");
        let result = client.fetch_rows();
        match &result {
            Ok(rows) => tracing::debug!(token, rows = rows.len(), "fetch succeeded"),
            Err(message) => tracing::warn!(token, %message, "fetch failed"),
        }
        let _ = tx.send(FetchOutcome { token, result });
    });
}
