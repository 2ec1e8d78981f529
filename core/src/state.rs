//! View-state store expressed as a reducer.
//!
//! # Design
//! `TodoState` is plain data and `TodoState::apply` is the only way it
//! changes. Every user intent is split into a start transition (applied
//! before the request leaves) and a success or failure transition (applied
//! when the response lands), so each step is deterministic and can be tested
//! without a network or a rendering surface.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::error::{ErrorBanner, ErrorMessage};
use crate::filter::StatusFilter;
use crate::types::{Todo, TodoId, UpdateTodo};

/// Inline edit in progress: which todo, and the text typed so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: TodoId,
    pub draft: String,
}

/// A discrete state transition.
#[derive(Debug, Clone)]
pub enum Action {
    LoadSucceeded(Vec<Todo>),
    LoadFailed,
    SetNewTitle(String),
    /// Submission refused before any request was built (blank title).
    CreateRejected,
    /// Carries the placeholder to show while the request is in flight.
    CreateStarted(Todo),
    CreateSucceeded(Todo),
    CreateFailed,
    DeleteStarted(TodoId),
    DeleteSucceeded(TodoId),
    DeleteFailed(TodoId),
    /// `optimistic` is applied to the local record immediately.
    UpdateStarted {
        id: TodoId,
        optimistic: Option<UpdateTodo>,
    },
    UpdateSucceeded(Todo),
    /// `snapshot` is the record as it was before the update started.
    UpdateFailed {
        snapshot: Todo,
    },
    SetFilter(StatusFilter),
    StartEditing(TodoId),
    SetEditDraft(String),
    CancelEditing,
    DismissError,
    /// Lets time-based state (the error banner) catch up with `now`.
    Tick,
}

#[derive(Debug, Clone)]
pub struct TodoState {
    pub todos: Vec<Todo>,
    /// Unsaved record shown while a create request is in flight.
    pub placeholder: Option<Todo>,
    /// In-flight request count per id.
    pub loading: BTreeMap<TodoId, usize>,
    pub editing: Option<EditDraft>,
    pub filter: StatusFilter,
    pub error: ErrorBanner,
    pub new_title: String,
    pub submitting: bool,
    pub input_focused: bool,
}

impl Default for TodoState {
    fn default() -> Self {
        Self {
            todos: Vec::new(),
            placeholder: None,
            loading: BTreeMap::new(),
            editing: None,
            filter: StatusFilter::All,
            error: ErrorBanner::default(),
            new_title: String::new(),
            submitting: false,
            input_focused: true,
        }
    }
}

impl TodoState {
    pub fn new(error_timeout: Duration) -> Self {
        Self {
            error: ErrorBanner::new(error_timeout),
            ..Self::default()
        }
    }

    pub fn apply(&mut self, action: Action, now: Instant) {
        match action {
            Action::LoadSucceeded(todos) => self.todos = todos,
            Action::LoadFailed => self.error.raise(ErrorMessage::LoadFailed, now),
            Action::SetNewTitle(title) => self.new_title = title,
            Action::CreateRejected => self.error.raise(ErrorMessage::EmptyTitle, now),
            Action::CreateStarted(placeholder) => {
                self.submitting = true;
                self.placeholder = Some(placeholder);
                self.input_focused = false;
            }
            Action::CreateSucceeded(todo) => {
                self.todos.push(todo);
                self.new_title.clear();
                self.finish_create();
            }
            Action::CreateFailed => {
                self.error.raise(ErrorMessage::AddFailed, now);
                self.finish_create();
            }
            Action::DeleteStarted(id) => self.mark_loading(id),
            Action::DeleteSucceeded(id) => {
                self.todos.retain(|todo| todo.id != id);
                if self.editing.as_ref().is_some_and(|edit| edit.id == id) {
                    self.editing = None;
                }
                self.clear_loading(id);
            }
            Action::DeleteFailed(id) => {
                self.error.raise(ErrorMessage::DeleteFailed, now);
                self.clear_loading(id);
            }
            Action::UpdateStarted { id, optimistic } => {
                self.mark_loading(id);
                if let (Some(patch), Some(todo)) = (optimistic, self.find_mut(id)) {
                    patch.apply_to(todo);
                }
            }
            Action::UpdateSucceeded(updated) => {
                let id = updated.id;
                if let Some(todo) = self.find_mut(id) {
                    *todo = updated;
                }
                self.editing = None;
                self.clear_loading(id);
            }
            Action::UpdateFailed { snapshot } => {
                self.error.raise(ErrorMessage::UpdateFailed, now);
                let id = snapshot.id;
                if let Some(edit) = self.editing.as_mut().filter(|edit| edit.id == id) {
                    edit.draft = snapshot.title.clone();
                }
                if let Some(todo) = self.find_mut(id) {
                    *todo = snapshot;
                }
                self.clear_loading(id);
            }
            Action::SetFilter(filter) => self.filter = filter,
            Action::StartEditing(id) => {
                self.editing = self.find(id).map(|todo| EditDraft {
                    id,
                    draft: todo.title.clone(),
                });
            }
            Action::SetEditDraft(draft) => {
                if let Some(edit) = self.editing.as_mut() {
                    edit.draft = draft;
                }
            }
            Action::CancelEditing => self.editing = None,
            Action::DismissError => self.error.dismiss(),
            Action::Tick => {
                self.error.expire(now);
            }
        }
    }

    pub fn find(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    fn find_mut(&mut self, id: TodoId) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|todo| todo.id == id)
    }

    fn finish_create(&mut self) {
        self.submitting = false;
        self.placeholder = None;
        self.input_focused = true;
    }

    fn mark_loading(&mut self, id: TodoId) {
        *self.loading.entry(id).or_insert(0) += 1;
    }

    fn clear_loading(&mut self, id: TodoId) {
        if let Some(count) = self.loading.get_mut(&id) {
            *count -= 1;
            if *count == 0 {
                self.loading.remove(&id);
            }
        }
    }

    /// The placeholder is always loading; saved todos are loading while at
    /// least one request for them is in flight.
    pub fn is_loading(&self, id: TodoId) -> bool {
        id == crate::types::PLACEHOLDER_ID || self.loading.contains_key(&id)
    }

    pub fn error_message(&self) -> Option<ErrorMessage> {
        self.error.message()
    }

    pub fn active_count(&self) -> usize {
        self.todos.iter().filter(|todo| !todo.completed).count()
    }

    pub fn completed_ids(&self) -> Vec<TodoId> {
        self.todos
            .iter()
            .filter(|todo| todo.completed)
            .map(|todo| todo.id)
            .collect()
    }

    /// Todos passing the current filter, followed by the placeholder if one
    /// is pending.
    pub fn visible_todos(&self) -> Vec<&Todo> {
        self.todos
            .iter()
            .filter(|todo| self.filter.matches(todo))
            .chain(self.placeholder.iter())
            .collect()
    }
}
