//! Status filter applied by the view to the todo list.

use std::fmt;
use std::str::FromStr;

use crate::types::Todo;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 3] = [StatusFilter::All, StatusFilter::Active, StatusFilter::Completed];

    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => !todo.completed,
            StatusFilter::Completed => todo.completed,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Completed => "completed",
        };
        f.write_str(name)
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "completed" => Ok(StatusFilter::Completed),
            other => Err(format!("unknown filter: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(completed: bool) -> Todo {
        Todo {
            id: 1,
            user_id: 1,
            title: "t".to_string(),
            completed,
        }
    }

    #[test]
    fn filters_by_completion() {
        assert!(StatusFilter::All.matches(&todo(true)));
        assert!(StatusFilter::Active.matches(&todo(false)));
        assert!(!StatusFilter::Active.matches(&todo(true)));
        assert!(StatusFilter::Completed.matches(&todo(true)));
        assert!(!StatusFilter::Completed.matches(&todo(false)));
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Active".parse::<StatusFilter>(), Ok(StatusFilter::Active));
        assert!("done".parse::<StatusFilter>().is_err());
        for filter in StatusFilter::ALL {
            assert_eq!(filter.to_string().parse::<StatusFilter>(), Ok(filter));
        }
    }
}
