//! Session context: user intents in, HTTP requests out, responses reconciled.
//!
//! # Design
//! `Session` owns the `TodoClient` and the `TodoState` and is the single
//! context object a host hands user events to. An intent applies its start
//! transition right away and returns the requests it needs as
//! `PendingRequest`s. The host executes them in any order, concurrently if it
//! likes, and passes each outcome back to `Session::complete`, which parses it
//! and applies the matching success or failure transition.
//!
//! Updates follow snapshot → local mutation → remote confirmation → commit or
//! rollback. Snapshots are taken per item, so a failed request only ever
//! rolls back its own id.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::filter::StatusFilter;
use crate::http::{HttpRequest, HttpResponse};
use crate::state::{Action, TodoState};
use crate::types::{Todo, TodoId, UpdateTodo};

/// What a request was issued for, carried back with its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingOp {
    Load,
    Create,
    Delete(TodoId),
    Update { snapshot: Todo },
}

/// A request the host must execute, tagged with how to reconcile it.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub request: HttpRequest,
    pub op: PendingOp,
}

#[derive(Debug, Clone)]
pub struct Session {
    client: TodoClient,
    state: TodoState,
}

impl Session {
    pub fn new(client: TodoClient) -> Self {
        Self {
            client,
            state: TodoState::default(),
        }
    }

    pub fn with_error_timeout(client: TodoClient, error_timeout: Duration) -> Self {
        Self {
            client,
            state: TodoState::new(error_timeout),
        }
    }

    pub fn state(&self) -> &TodoState {
        &self.state
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    fn dispatch(&mut self, action: Action) {
        self.state.apply(action, Instant::now());
    }

    /// Fetch the whole collection for the session's user.
    pub fn load(&mut self) -> Vec<PendingRequest> {
        self.dispatch(Action::DismissError);
        vec![PendingRequest {
            request: self.client.build_list_todos(),
            op: PendingOp::Load,
        }]
    }

    pub fn set_new_title(&mut self, title: impl Into<String>) {
        self.dispatch(Action::SetNewTitle(title.into()));
    }

    /// Submit the new-todo input. A blank title raises `EmptyTitle` without a
    /// request; a submit while another create is in flight is ignored.
    pub fn submit_new_todo(&mut self) -> Vec<PendingRequest> {
        if self.state.submitting {
            debug!("create already in flight, ignoring submit");
            return Vec::new();
        }
        let title = self.state.new_title.trim().to_string();
        if title.is_empty() {
            self.dispatch(Action::CreateRejected);
            return Vec::new();
        }

        let input = self.client.new_todo(&title);
        self.dispatch(Action::CreateStarted(Todo::placeholder(&input)));
        match self.client.build_create_todo(&input) {
            Ok(request) => vec![PendingRequest {
                request,
                op: PendingOp::Create,
            }],
            Err(err) => {
                warn!(error = %err, "could not build create request");
                self.dispatch(Action::CreateFailed);
                Vec::new()
            }
        }
    }

    pub fn delete(&mut self, id: TodoId) -> Vec<PendingRequest> {
        self.dispatch(Action::DeleteStarted(id));
        vec![PendingRequest {
            request: self.client.build_delete_todo(id),
            op: PendingOp::Delete(id),
        }]
    }

    /// One independent delete per todo completed at call time.
    pub fn clear_completed(&mut self) -> Vec<PendingRequest> {
        self.state
            .completed_ids()
            .into_iter()
            .flat_map(|id| self.delete(id))
            .collect()
    }

    pub fn toggle(&mut self, id: TodoId) -> Vec<PendingRequest> {
        let Some(completed) = self.state.find(id).map(|todo| todo.completed) else {
            debug!(id, "toggle on unknown todo");
            return Vec::new();
        };
        self.update(id, UpdateTodo::completed(!completed), false)
    }

    /// Complete everything if anything is active, otherwise un-complete
    /// everything. Each differing todo gets its own update.
    pub fn toggle_all(&mut self) -> Vec<PendingRequest> {
        let target = self.state.active_count() > 0;
        let ids: Vec<TodoId> = self
            .state
            .todos
            .iter()
            .filter(|todo| todo.completed != target)
            .map(|todo| todo.id)
            .collect();
        ids.into_iter()
            .flat_map(|id| self.update(id, UpdateTodo::completed(target), false))
            .collect()
    }

    /// Rename a todo. A blank title deletes it; an unchanged title only
    /// leaves edit mode.
    pub fn rename(&mut self, id: TodoId, new_title: &str) -> Vec<PendingRequest> {
        let new_title = new_title.trim();
        let Some(current) = self.state.find(id).map(|todo| todo.title.clone()) else {
            debug!(id, "rename on unknown todo");
            return Vec::new();
        };
        if new_title.is_empty() {
            return self.delete(id);
        }
        if new_title == current {
            self.dispatch(Action::CancelEditing);
            return Vec::new();
        }
        self.update(id, UpdateTodo::title(new_title), true)
    }

    pub fn start_editing(&mut self, id: TodoId) {
        self.dispatch(Action::StartEditing(id));
    }

    pub fn set_edit_draft(&mut self, draft: impl Into<String>) {
        self.dispatch(Action::SetEditDraft(draft.into()));
    }

    /// Escape: leave edit mode without saving.
    pub fn cancel_editing(&mut self) {
        self.dispatch(Action::CancelEditing);
    }

    /// Submit or blur: rename the edited todo to the current draft.
    pub fn confirm_editing(&mut self) -> Vec<PendingRequest> {
        match self.state.editing.clone() {
            Some(edit) => self.rename(edit.id, &edit.draft),
            None => Vec::new(),
        }
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.dispatch(Action::SetFilter(filter));
    }

    pub fn dismiss_error(&mut self) {
        self.dispatch(Action::DismissError);
    }

    pub fn tick(&mut self, now: Instant) {
        self.state.apply(Action::Tick, now);
    }

    fn update(&mut self, id: TodoId, patch: UpdateTodo, optimistic: bool) -> Vec<PendingRequest> {
        let Some(snapshot) = self.state.find(id).cloned() else {
            return Vec::new();
        };
        let request = match self.client.build_update_todo(id, &patch) {
            Ok(request) => request,
            Err(err) => {
                warn!(id, error = %err, "could not build update request");
                self.dispatch(Action::UpdateStarted { id, optimistic: None });
                self.dispatch(Action::UpdateFailed { snapshot });
                return Vec::new();
            }
        };
        self.dispatch(Action::UpdateStarted {
            id,
            optimistic: optimistic.then_some(patch),
        });
        vec![PendingRequest {
            request,
            op: PendingOp::Update { snapshot },
        }]
    }

    /// Reconcile the outcome of a request previously returned by an intent.
    pub fn complete(&mut self, op: PendingOp, outcome: Result<HttpResponse, ApiError>) {
        let action = match op {
            PendingOp::Load => match outcome.and_then(|r| self.client.parse_list_todos(r)) {
                Ok(todos) => {
                    debug!(count = todos.len(), "loaded todos");
                    Action::LoadSucceeded(todos)
                }
                Err(err) => {
                    warn!(error = %err, "load failed");
                    Action::LoadFailed
                }
            },
            PendingOp::Create => match outcome.and_then(|r| self.client.parse_create_todo(r)) {
                Ok(todo) => {
                    debug!(id = todo.id, "created todo");
                    Action::CreateSucceeded(todo)
                }
                Err(err) => {
                    warn!(error = %err, "create failed");
                    Action::CreateFailed
                }
            },
            PendingOp::Delete(id) => match outcome.and_then(|r| self.client.parse_delete_todo(r)) {
                Ok(()) => {
                    debug!(id, "deleted todo");
                    Action::DeleteSucceeded(id)
                }
                Err(err) => {
                    warn!(id, error = %err, "delete failed");
                    Action::DeleteFailed(id)
                }
            },
            PendingOp::Update { snapshot } => {
                match outcome.and_then(|r| self.client.parse_update_todo(r)) {
                    Ok(todo) => {
                        debug!(id = todo.id, "updated todo");
                        Action::UpdateSucceeded(todo)
                    }
                    Err(err) => {
                        warn!(id = snapshot.id, error = %err, "update failed");
                        Action::UpdateFailed { snapshot }
                    }
                }
            }
        };
        self.dispatch(action);
    }
}
