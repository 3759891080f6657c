//! Submission handling and the fetch/render cycle.
//!
//! # Design
//! `SubmissionHandler` owns the injected `StateStore` and `ListRenderer` and
//! never performs I/O. Every network operation leaves the handler as a
//! `Command` (a `Ticket` plus the `HttpRequest` to execute) and comes back
//! through `on_response` with the same ticket. Whatever the host does in
//! between, all state changes happen on the thread that owns the handler.
//!
//! # Ordering
//! - At most one write is in flight; later submissions queue up FIFO.
//! - A write's refresh is issued only once the write has completed.
//! - Fetches carry increasing sequence numbers and are applied through
//!   `StateStore::apply`, so an older response arriving late is dropped.
//!
//! Once the handler is quiescent the display therefore shows the answer to a
//! fetch issued after every submitted write completed.
//!
//! # Input
//! The input is cleared as soon as a submission is accepted. If its write
//! fails, the value goes back into the input unless the input already holds
//! text; then it is held for retry instead. The next accepted submission
//! queues every held value right behind itself, so no failed write is lost.

use std::collections::VecDeque;

use tracing::{debug, error, info, warn};

use crate::client::SyncClient;
use crate::error::SyncError;
use crate::http::{HttpRequest, HttpResponse};
use crate::render::{ListRenderer, Surface};
use crate::store::StateStore;
use crate::types::Item;

/// Identifies which operation a response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ticket {
    Fetch { seq: u64 },
    Write { id: u64 },
}

/// A request the host must execute, answered via `SubmissionHandler::on_response`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub ticket: Ticket,
    pub request: HttpRequest,
}

/// Outcome of `SubmissionHandler::submit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Empty input. Nothing was sent and nothing changed.
    Rejected,
    /// The write goes out now.
    Dispatched(Command),
    /// Another write is in flight; this one waits at `position` in the queue.
    Queued { position: usize },
    /// The write could not even be built. The input has been restored.
    Failed(SyncError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing rendered yet and nothing in flight.
    Idle,
    /// A write is in flight or queued.
    Submitting,
    /// Only fetches are in flight.
    Fetching,
    /// Quiescent with a rendered list.
    Rendered,
}

#[derive(Debug)]
pub struct SubmissionHandler<S> {
    client: SyncClient,
    store: StateStore,
    renderer: ListRenderer<S>,
    input: String,
    next_fetch_seq: u64,
    next_write_id: u64,
    fetches_in_flight: usize,
    write_in_flight: Option<(u64, Item)>,
    queued: VecDeque<Item>,
    held_for_retry: VecDeque<Item>,
}

impl<S: Surface> SubmissionHandler<S> {
    pub fn new(client: SyncClient, store: StateStore, renderer: ListRenderer<S>) -> Self {
        Self {
            client,
            store,
            renderer,
            input: String::new(),
            next_fetch_seq: 1,
            next_write_id: 1,
            fetches_in_flight: 0,
            write_in_flight: None,
            queued: VecDeque::new(),
            held_for_retry: VecDeque::new(),
        }
    }

    /// Initial fetch on startup.
    pub fn load(&mut self) -> Command {
        self.refresh()
    }

    /// Issue a fetch of the full list. Never cancels fetches already in flight.
    pub fn refresh(&mut self) -> Command {
        let seq = self.next_fetch_seq;
        self.next_fetch_seq += 1;
        self.fetches_in_flight += 1;
        debug!(seq, "dispatching fetch");
        Command {
            ticket: Ticket::Fetch { seq },
            request: self.client.build_fetch_all(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: &str) {
        self.input.clear();
        self.input.push_str(text);
    }

    pub fn submit(&mut self) -> Submission {
        if self.input.is_empty() {
            debug!("ignoring empty submission");
            return Submission::Rejected;
        }
        let item = Item::new(std::mem::take(&mut self.input));
        let retries: Vec<Item> = self.held_for_retry.drain(..).collect();
        if !retries.is_empty() {
            info!(count = retries.len(), "resubmitting held items");
        }

        if self.write_in_flight.is_some() {
            debug!(item = %item, "write in flight, queueing submission");
            self.queued.push_back(item);
            let position = self.queued.len();
            self.queued.extend(retries);
            return Submission::Queued { position };
        }

        match self.dispatch_write(item) {
            Ok(command) => {
                self.queued.extend(retries);
                Submission::Dispatched(command)
            }
            Err(err) => {
                self.held_for_retry.extend(retries);
                Submission::Failed(err)
            }
        }
    }

    /// Resolve the operation behind `ticket` and return follow-up commands.
    pub fn on_response(&mut self, ticket: Ticket, outcome: Result<HttpResponse, SyncError>) -> Vec<Command> {
        match ticket {
            Ticket::Fetch { seq } => {
                self.resolve_fetch(seq, outcome);
                Vec::new()
            }
            Ticket::Write { id } => self.resolve_write(id, outcome),
        }
    }

    /// Execute `commands` and every follow-up in order until nothing is left.
    ///
    /// For hosts that can block on I/O, and for tests.
    pub fn drive<F>(&mut self, commands: impl IntoIterator<Item = Command>, mut execute: F)
    where
        F: FnMut(&HttpRequest) -> Result<HttpResponse, SyncError>,
    {
        let mut pending: VecDeque<Command> = commands.into_iter().collect();
        while let Some(command) = pending.pop_front() {
            let outcome = execute(&command.request);
            pending.extend(self.on_response(command.ticket, outcome));
        }
    }

    pub fn phase(&self) -> Phase {
        if self.write_in_flight.is_some() || !self.queued.is_empty() {
            Phase::Submitting
        } else if self.fetches_in_flight > 0 {
            Phase::Fetching
        } else if self.renderer.render_count() > 0 {
            Phase::Rendered
        } else {
            Phase::Idle
        }
    }

    pub fn is_quiescent(&self) -> bool {
        self.write_in_flight.is_none() && self.queued.is_empty() && self.fetches_in_flight == 0
    }

    /// Failed values waiting for the next submission, besides the input.
    pub fn held_for_retry(&self) -> impl Iterator<Item = &Item> {
        self.held_for_retry.iter()
    }

    pub fn client(&self) -> &SyncClient {
        &self.client
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn renderer(&self) -> &ListRenderer<S> {
        &self.renderer
    }

    fn resolve_fetch(&mut self, seq: u64, outcome: Result<HttpResponse, SyncError>) {
        self.fetches_in_flight = self.fetches_in_flight.saturating_sub(1);

        match outcome.and_then(|response| self.client.parse_fetch_all(response)) {
            Ok(items) => {
                let count = items.len();
                if !self.store.apply(seq, items) {
                    debug!(seq, applied = ?self.store.applied_seq(), "discarding stale fetch");
                    return;
                }
                if self.store.take_dirty() {
                    self.renderer.render(self.store.items());
                    info!(seq, count, "list refreshed");
                }
            }
            Err(err) => {
                if self.store.applied_seq().is_some_and(|applied| seq <= applied) {
                    debug!(seq, %err, "stale fetch failed");
                    return;
                }
                match &err {
                    SyncError::Decode(_) => error!(seq, %err, "fetch returned an unreadable list"),
                    _ => warn!(seq, %err, "fetch failed, keeping last list"),
                }
                self.renderer.notify(&err);
            }
        }
    }

    fn resolve_write(&mut self, id: u64, outcome: Result<HttpResponse, SyncError>) -> Vec<Command> {
        let item = match self.write_in_flight.take() {
            Some((current, item)) if current == id => item,
            other => {
                self.write_in_flight = other;
                warn!(id, "ignoring response for unknown write");
                return Vec::new();
            }
        };

        match outcome.and_then(|response| self.client.parse_post_item(response)) {
            Ok(()) => info!(id, item = %item, "write confirmed"),
            Err(err) => self.write_failed(item, &err),
        }

        // The server decides whether the item landed, even after a failure.
        let mut commands = vec![self.refresh()];
        commands.extend(self.dispatch_next());
        commands
    }

    fn dispatch_next(&mut self) -> Option<Command> {
        while let Some(item) = self.queued.pop_front() {
            if let Ok(command) = self.dispatch_write(item) {
                return Some(command);
            }
        }
        None
    }

    fn dispatch_write(&mut self, item: Item) -> Result<Command, SyncError> {
        let request = match self.client.build_post_item(&item) {
            Ok(request) => request,
            Err(err) => {
                self.write_failed(item, &err);
                return Err(err);
            }
        };
        let id = self.next_write_id;
        self.next_write_id += 1;
        debug!(id, item = %item, "dispatching write");
        self.write_in_flight = Some((id, item));
        Ok(Command {
            ticket: Ticket::Write { id },
            request,
        })
    }

    fn write_failed(&mut self, item: Item, err: &SyncError) {
        warn!(item = %item, %err, "write failed");
        self.renderer.notify(err);
        if self.input.is_empty() {
            info!(item = %item, "restoring input after failed write");
            self.input = item.into_string();
        } else {
            debug!(item = %item, "input occupied, holding value for retry");
            self.held_for_retry.push_back(item);
        }
    }
}
