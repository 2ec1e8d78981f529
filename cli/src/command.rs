//! Line-oriented commands accepted by the terminal host.

use std::str::FromStr;

use thiserror::Error;
use todoapp_core::{PendingRequest, Session, StatusFilter, TodoId};

pub const HELP: &str = "\
commands:
  add <title>          create a todo
  toggle <id>          flip a todo's completed flag
  toggle-all           complete everything, or un-complete if all are done
  rm <id>              delete a todo
  clear                delete every completed todo
  edit <id>            start editing a todo's title
  draft <text>         replace the edit field's text
  save                 confirm the edit (blank deletes the todo)
  cancel               leave edit mode without saving
  rename <id> <title>  edit and confirm in one step
  filter <all|active|completed>
  dismiss              hide the error message
  reload               fetch the list again
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Toggle(TodoId),
    ToggleAll,
    Remove(TodoId),
    ClearCompleted,
    Edit(TodoId),
    Draft(String),
    Save,
    Cancel,
    Rename(TodoId, String),
    Filter(StatusFilter),
    Dismiss,
    Reload,
    /// Empty line: just redraw.
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("not a todo id: {0}")]
    InvalidId(String),

    #[error("{0}")]
    InvalidFilter(String),
}

impl Command {
    /// Run the command against the session, returning the requests it needs.
    pub fn dispatch(self, session: &mut Session) -> Vec<PendingRequest> {
        match self {
            Command::Add(title) => {
                session.set_new_title(title);
                session.submit_new_todo()
            }
            Command::Toggle(id) => session.toggle(id),
            Command::ToggleAll => session.toggle_all(),
            Command::Remove(id) => session.delete(id),
            Command::ClearCompleted => session.clear_completed(),
            Command::Edit(id) => {
                session.start_editing(id);
                Vec::new()
            }
            Command::Draft(text) => {
                session.set_edit_draft(text);
                Vec::new()
            }
            Command::Save => session.confirm_editing(),
            Command::Cancel => {
                session.cancel_editing();
                Vec::new()
            }
            Command::Rename(id, title) => {
                session.start_editing(id);
                session.set_edit_draft(title);
                session.confirm_editing()
            }
            Command::Filter(filter) => {
                session.set_filter(filter);
                Vec::new()
            }
            Command::Dismiss => {
                session.dismiss_error();
                Vec::new()
            }
            Command::Reload => session.load(),
            Command::Show | Command::Help | Command::Quit => Vec::new(),
        }
    }
}

fn parse_id(raw: &str, command: &'static str) -> Result<TodoId, CommandError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }
    raw.parse().map_err(|_| CommandError::InvalidId(raw.to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let command = match word {
            "" => Command::Show,
            // The title is passed untrimmed; the session trims and validates it.
            "add" => Command::Add(rest.to_string()),
            "toggle" => Command::Toggle(parse_id(rest, "toggle")?),
            "toggle-all" => Command::ToggleAll,
            "rm" | "delete" => Command::Remove(parse_id(rest, "rm")?),
            "clear" => Command::ClearCompleted,
            "edit" => Command::Edit(parse_id(rest, "edit")?),
            "draft" => Command::Draft(rest.to_string()),
            "save" => Command::Save,
            "cancel" => Command::Cancel,
            "rename" => {
                let rest = rest.trim_start();
                let (id, title) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                Command::Rename(parse_id(id, "rename")?, title.to_string())
            }
            "filter" => {
                if rest.trim().is_empty() {
                    return Err(CommandError::MissingArgument("filter"));
                }
                Command::Filter(rest.parse().map_err(CommandError::InvalidFilter)?)
            }
            "dismiss" => Command::Dismiss,
            "reload" => Command::Reload,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}
