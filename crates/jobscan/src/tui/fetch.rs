//! Background fetch worker.
//!
//! The UI thread never blocks on the network: it sends [`FetchRequest`]s down
//! an mpsc channel and polls for [`FetchOutcome`]s each frame. Requests that
//! pile up while one is in flight are coalesced down to the most recent, and
//! every outcome carries the id of the request that produced it so the app can
//! drop responses from superseded searches.

use jobscan_remotive::{Client, Job};
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// One search issued by the UI.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// Monotonic sequence number; only the outcome matching the most recently
    /// issued id is applied.
    pub id: u64,
    pub keyword: String,
    pub category: String,
}

/// Outcome of one request. The error is already reduced to a display string;
/// whether it presents as "empty" or "failed" is the app's decision.
#[derive(Debug)]
pub struct FetchOutcome {
    pub request_id: u64,
    pub result: Result<Vec<Job>, String>,
    pub duration: Duration,
}

/// Spawn the fetch worker thread.
pub fn spawn_worker(
    req_rx: Receiver<FetchRequest>,
    out_tx: Sender<FetchOutcome>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        // Built lazily so a constructor failure surfaces as a fetch failure
        // for the request that hit it.
        let mut client: Option<Client> = None;

        while let Ok(mut req) = req_rx.recv() {
            // Coalesce rapid searches - keep only the latest
            while let Ok(next) = req_rx.try_recv() {
                req = next;
            }

            if client.is_none() {
                match Client::new() {
                    Ok(c) => client = Some(c),
                    Err(e) => {
                        log::warn!("failed to build http client: {e}");
                        let _ = out_tx.send(FetchOutcome {
                            request_id: req.id,
                            result: Err(e.to_string()),
                            duration: Duration::ZERO,
                        });
                        continue;
                    }
                }
            }
            let Some(c) = client.as_ref() else { continue };

            let start = Instant::now();
            let result = c.search(&req.keyword, &req.category).map_err(|e| {
                log::warn!("fetch failed: {e}");
                e.to_string()
            });

            let _ = out_tx.send(FetchOutcome {
                request_id: req.id,
                result,
                duration: start.elapsed(),
            });
        }
    })
}
