//! Fetch/render/submit cycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives a `SubmissionHandler`
//! over real HTTP using ureq. Validates that request building, response
//! parsing and the ordering rules hold end-to-end with the actual server.

use list_sync_core::{
    HttpMethod, HttpRequest, HttpResponse, ListRenderer, MemorySurface, StateStore, Submission,
    SubmissionHandler, SyncClient, SyncError,
};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses come back as data and the core decides what they mean.
fn execute(req: &HttpRequest) -> Result<HttpResponse, SyncError> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let result = match (req.method, req.body.as_deref()) {
        (HttpMethod::Get, _) => agent.get(&req.url).call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(&req.url)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(&req.url).send_empty(),
    };
    let mut response = result.map_err(|e| SyncError::Network(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();
    Ok(HttpResponse::new(status, body))
}

/// Start the mock server seeded with `items` and return its base URL.
fn start_server(items: &[&str]) -> String {
    let items: Vec<String> = items.iter().map(|s| s.to_string()).collect();
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with_items(listener, items).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn handler(base_url: &str) -> SubmissionHandler<MemorySurface> {
    SubmissionHandler::new(
        SyncClient::new(base_url),
        StateStore::new(),
        ListRenderer::new(MemorySurface::new()),
    )
}

#[test]
fn submit_and_refresh_cycle() {
    let base_url = start_server(&["eggs"]);
    let mut h = handler(&base_url);

    // Step 1: initial load.
    let load = h.load();
    h.drive([load], execute);
    assert_eq!(h.renderer().surface().texts(), ["eggs"]);

    // Step 2: empty submission goes nowhere.
    assert_eq!(h.submit(), Submission::Rejected);

    // Step 3: submit "milk"; the refresh follows the confirmed write.
    h.set_input("milk");
    let Submission::Dispatched(write) = h.submit() else {
        panic!("expected dispatch");
    };
    assert_eq!(h.input(), "");
    h.drive([write], execute);
    assert_eq!(h.renderer().surface().texts(), ["eggs", "milk"]);
    assert!(h.is_quiescent());

    // Step 4: refreshing an unchanged list renders the same thing.
    let before = h.renderer().surface().clone();
    let refresh = h.refresh();
    h.drive([refresh], execute);
    assert_eq!(h.renderer().surface(), &before);
}

#[test]
fn back_to_back_submissions_land_in_order() {
    let base_url = start_server(&[]);
    let mut h = handler(&base_url);

    h.set_input("a");
    let Submission::Dispatched(write_a) = h.submit() else {
        panic!("expected dispatch");
    };
    h.set_input("b");
    assert_eq!(h.submit(), Submission::Queued { position: 1 });

    h.drive([write_a], execute);
    assert_eq!(h.renderer().surface().texts(), ["a", "b"]);
    assert!(h.is_quiescent());
}

#[test]
fn unreachable_server_keeps_list_and_restores_input() {
    // Bind and drop to get a port nobody listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let mut h = handler(&format!("http://{addr}"));

    h.set_input("milk");
    let Submission::Dispatched(write) = h.submit() else {
        panic!("expected dispatch");
    };
    h.drive([write], execute);

    assert_eq!(h.input(), "milk");
    assert!(h.renderer().surface().children.is_empty());
    // one for the write, one for the refresh
    assert_eq!(h.renderer().surface().notices.len(), 2);
}
