//! Plain-text rendering of a `ViewModel`.

use std::fmt::Write;

use todoapp_core::{StatusFilter, ViewModel};

pub fn render(view: &ViewModel) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_view(&mut out, view);
    out
}

fn write_view(out: &mut String, view: &ViewModel) -> std::fmt::Result {
    writeln!(out, "todos")?;

    let toggle = match (view.header.show_toggle_all, view.header.toggle_all_active) {
        (false, _) => "   ",
        (true, false) => "[ ]",
        (true, true) => "[v]",
    };
    let input = if view.header.input_disabled {
        format!("{} (saving...)", view.header.input)
    } else if view.header.input.is_empty() {
        "What needs to be done?".to_string()
    } else {
        view.header.input.clone()
    };
    writeln!(out, "{toggle} > {input}")?;

    for row in &view.rows {
        let mark = if row.completed { "[x]" } else { "[ ]" };
        let id = if row.id == 0 { "-".to_string() } else { row.id.to_string() };
        match &row.draft {
            Some(draft) => write!(out, "{id:>4} {mark} edit: {draft}_")?,
            None => write!(out, "{id:>4} {mark} {}", row.title)?,
        }
        if row.loading {
            write!(out, "  ...")?;
        }
        writeln!(out)?;
    }

    if let Some(footer) = &view.footer {
        let noun = if footer.items_left == 1 { "item" } else { "items" };
        write!(out, "{} {noun} left  ", footer.items_left)?;
        for filter in StatusFilter::ALL {
            if filter == footer.filter {
                write!(out, "[{filter}] ")?;
            } else {
                write!(out, "{filter} ")?;
            }
        }
        if footer.clear_completed_enabled {
            write!(out, " (clear completed)")?;
        }
        writeln!(out)?;
    }

    if let Some(error) = view.error {
        writeln!(out, "! {error}  (dismiss)")?;
    }
    Ok(())
}
