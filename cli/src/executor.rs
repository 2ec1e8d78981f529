//! Executes the requests a `Session` hands out.
//!
//! # Design
//! Requests from one intent run concurrently on scoped threads and are
//! reconciled in the order their responses arrive, so a batch such as
//! "clear completed" behaves like independent in-flight requests. There is
//! no retry, timeout or cancellation.

use std::sync::mpsc;
use std::thread;

use todoapp_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, PendingRequest, Session};
use tracing::debug;

#[derive(Clone)]
pub struct Executor {
    agent: ureq::Agent,
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor {
    /// Non-2xx statuses come back as data so the core client can interpret
    /// them.
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %req.method, path = %req.path, "sending request");
        let body = req.body.unwrap_or_default();
        let mut response = match req.method {
            HttpMethod::Get => self.agent.get(&req.path).call(),
            HttpMethod::Delete => self.agent.delete(&req.path).call(),
            HttpMethod::Post => self
                .agent
                .post(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            HttpMethod::Patch => self
                .agent
                .patch(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
        }
        .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        debug!(status, "received response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    /// Execute every pending request and reconcile each outcome as it lands.
    pub fn run(&self, session: &mut Session, pending: Vec<PendingRequest>) {
        if pending.is_empty() {
            return;
        }
        let (tx, rx) = mpsc::channel();
        thread::scope(|scope| {
            for p in pending {
                let tx = tx.clone();
                scope.spawn(move || {
                    let outcome = self.execute(p.request);
                    // The receiver lives until every sender is gone.
                    let _ = tx.send((p.op, outcome));
                });
            }
            drop(tx);
            for (op, outcome) in rx {
                session.complete(op, outcome);
            }
        });
    }
}
