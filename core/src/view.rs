//! Presentation model computed from `TodoState`.
//!
//! A rendering surface only reads a `ViewModel`; it never inspects the store
//! directly. Everything here is derived and carries no logic of its own
//! beyond the predicates the screen needs.

use crate::error::ErrorMessage;
use crate::filter::StatusFilter;
use crate::state::TodoState;
use crate::types::TodoId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub header: HeaderView,
    pub rows: Vec<RowView>,
    /// Hidden while the collection is empty.
    pub footer: Option<FooterView>,
    pub error: Option<ErrorMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub input: String,
    pub input_disabled: bool,
    pub input_focused: bool,
    pub show_toggle_all: bool,
    /// All todos are completed, so the toggle renders as "on".
    pub toggle_all_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
    pub loading: bool,
    /// Text of the edit field while this row is being edited.
    pub draft: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterView {
    pub items_left: usize,
    pub filter: StatusFilter,
    pub clear_completed_enabled: bool,
}

impl ViewModel {
    pub fn from_state(state: &TodoState) -> Self {
        let total = state.todos.len();
        let active = state.active_count();

        let header = HeaderView {
            input: state.new_title.clone(),
            input_disabled: state.submitting,
            input_focused: state.input_focused,
            show_toggle_all: total > 0,
            toggle_all_active: total > 0 && active == 0,
        };

        let rows = state
            .visible_todos()
            .into_iter()
            .map(|todo| RowView {
                id: todo.id,
                title: todo.title.clone(),
                completed: todo.completed,
                loading: state.is_loading(todo.id),
                draft: state
                    .editing
                    .as_ref()
                    .filter(|edit| edit.id == todo.id && !todo.is_placeholder())
                    .map(|edit| edit.draft.clone()),
            })
            .collect();

        let footer = (total > 0).then(|| FooterView {
            items_left: active,
            filter: state.filter,
            clear_completed_enabled: active < total,
        });

        Self {
            header,
            rows,
            footer,
            error: state.error_message(),
        }
    }
}
