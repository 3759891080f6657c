use clap::Parser;

/// Keep a terminal view of a server-held list in sync.
///
/// Each line read from stdin is submitted as a new item. An empty line
/// resubmits the last value whose write failed.
#[derive(Debug, Parser)]
#[command(name = "list-sync", version)]
pub struct Args {
    /// Base URL of the list server.
    #[arg(long, env = "LIST_SYNC_URL", default_value = "http://127.0.0.1:8000")]
    pub url: String,

    /// Fetch and print the list once, then exit.
    #[arg(long)]
    pub once: bool,
}
