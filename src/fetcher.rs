//! Executes backend commands on the tokio runtime.
//!
//! Each command runs as its own task and reports through an unbounded
//! channel drained by the event loop.

use crate::app::{Command, FetchOutcome};
use crate::backend::BackendClient;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

/// Spawns fetch tasks and tracks the in-flight filtered request.
#[derive(Debug)]
pub struct Dispatcher {
    client: BackendClient,
    tx: UnboundedSender<FetchOutcome>,
    /// Task of the most recent filtered request
    in_flight: Option<JoinHandle<()>>,
}

impl Dispatcher {
    /// Create a dispatcher sending outcomes to `tx`.
    pub fn new(client: BackendClient, tx: UnboundedSender<FetchOutcome>) -> Self {
        Self {
            client,
            tx,
            in_flight: None,
        }
    }

    /// Run `command` in the background.
    ///
    /// # Details
    /// Starting a filtered request aborts the previous one if it is still
    /// running. The outcome is dropped silently once the receiver is gone.
    pub fn dispatch(&mut self, command: Command) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        match command {
            Command::LoadAll => {
                tokio::spawn(async move {
                    let result = client.fetch_income_statements().await;
                    let _ = tx.send(FetchOutcome::Loaded(result));
                });
            }
            Command::FetchFiltered { token, query } => {
                if let Some(previous) = self.in_flight.take()
                    && !previous.is_finished()
                {
                    debug!(?token, "aborting superseded filtered request");
                    previous.abort();
                }
                self.in_flight = Some(tokio::spawn(async move {
                    let result = client.fetch_filtered(&query).await;
                    let _ = tx.send(FetchOutcome::Filtered { token, result });
                }));
            }
        }
    }
}
