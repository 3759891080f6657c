//! Terminal host for `list-sync-core`.
//!
//! The main thread owns the `SubmissionHandler` and is the only place state
//! changes. Requests run on short-lived worker threads and stdin is read on
//! its own thread; both report back over a single channel.

mod config;
mod surface;
mod transport;

use std::io::BufRead;
use std::sync::mpsc::{self, Sender};
use std::thread;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use list_sync_core::{
    Command, HttpResponse, ListRenderer, StateStore, Submission, SubmissionHandler, SyncClient,
    SyncError, Ticket,
};

use config::Args;
use surface::TerminalSurface;
use transport::Transport;

enum Event {
    Line(String),
    InputClosed,
    Response(Ticket, Result<HttpResponse, SyncError>),
}

type Handler = SubmissionHandler<TerminalSurface<std::io::Stdout>>;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries the list; logs go to stderr.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    tracing::info!(url = %args.url, "starting");

    let handler = SubmissionHandler::new(
        SyncClient::new(&args.url),
        StateStore::new(),
        ListRenderer::new(TerminalSurface::new(std::io::stdout())),
    );
    let transport = Transport::new();

    if args.once {
        return run_once(handler, &transport);
    }
    run(handler, transport)
}

fn run_once(mut handler: Handler, transport: &Transport) -> Result<()> {
    let load = handler.load();
    handler.drive([load], |req| transport.execute(req));
    if handler.store().applied_seq().is_none() {
        bail!("could not fetch the list from {}", handler.client().base_url());
    }
    Ok(())
}

fn run(mut handler: Handler, transport: Transport) -> Result<()> {
    let (tx, rx) = mpsc::channel();
    spawn_stdin_reader(tx.clone());
    dispatch(&tx, &transport, handler.load());

    let mut input_open = true;
    while input_open || !handler.is_quiescent() {
        match rx.recv().context("event channel closed")? {
            Event::Line(line) => {
                if !line.is_empty() {
                    handler.set_input(&line);
                }
                match handler.submit() {
                    Submission::Dispatched(command) => dispatch(&tx, &transport, command),
                    Submission::Queued { position } => tracing::debug!(position, "submission queued"),
                    Submission::Rejected => {}
                    Submission::Failed(err) => tracing::warn!(%err, "submission failed"),
                }
            }
            Event::InputClosed => input_open = false,
            Event::Response(ticket, outcome) => {
                for command in handler.on_response(ticket, outcome) {
                    dispatch(&tx, &transport, command);
                }
            }
        }
    }

    let unsent = usize::from(!handler.input().is_empty()) + handler.held_for_retry().count();
    if unsent > 0 {
        tracing::warn!(unsent, "exiting with failed submissions that were never retried");
    }
    Ok(())
}

fn dispatch(tx: &Sender<Event>, transport: &Transport, command: Command) {
    let tx = tx.clone();
    let transport = transport.clone();
    thread::spawn(move || {
        let outcome = transport.execute(&command.request);
        // Receiver only goes away on shutdown.
        let _ = tx.send(Event::Response(command.ticket, outcome));
    });
}

fn spawn_stdin_reader(tx: Sender<Event>) {
    thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(Event::Line(line)).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    tracing::warn!(%e, "failed to read stdin");
                    break;
                }
            }
        }
        let _ = tx.send(Event::InputClosed);
    });
}
