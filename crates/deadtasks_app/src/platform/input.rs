//! Keyboard commands typed at the prompt, and their translation into core
//! messages against the table currently on screen.

use deadtasks_core::{
    BulkAction, CheckState, DeadTasksView, ListContent, Msg, RowView, TableView,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NextPage,
    PreviousPage,
    /// One-based page number as shown in the footer.
    GoToPage(usize),
    PageSize(usize),
    ToggleSelectAll,
    /// One-based row number as shown in the table.
    ToggleRow(usize),
    Expand(usize),
    Delete(usize),
    Bulk(BulkAction),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Msg(Msg),
    Quit,
    Help,
    Rejected(String),
}

pub const HELP: &str = "n/p next/prev page | g <page> | s <size> | a select all | \
x <row> select | e <row> expand | d <row> delete | b run|kill|delete | h help | q quit";

pub fn parse(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let verb = words.next().ok_or_else(|| "empty command".to_string())?;
    let arg = words.next();
    if words.next().is_some() {
        return Err(format!("too many arguments for '{verb}'"));
    }

    let number = |name: &str| -> Result<usize, String> {
        let raw = arg.ok_or_else(|| format!("'{verb}' needs a {name}"))?;
        match raw.parse::<usize>() {
            Ok(value) if value > 0 => Ok(value),
            _ => Err(format!("'{raw}' is not a valid {name}")),
        }
    };

    match verb.to_ascii_lowercase().as_str() {
        "n" | "next" => Ok(Command::NextPage),
        "p" | "prev" => Ok(Command::PreviousPage),
        "g" | "page" => number("page number").map(Command::GoToPage),
        "s" | "size" => number("page size").map(Command::PageSize),
        "a" | "all" => Ok(Command::ToggleSelectAll),
        "x" | "select" => number("row number").map(Command::ToggleRow),
        "e" | "expand" => number("row number").map(Command::Expand),
        "d" | "delete" => number("row number").map(Command::Delete),
        "b" | "bulk" => match arg.map(str::to_ascii_lowercase).as_deref() {
            Some("run") => Ok(Command::Bulk(BulkAction::Run)),
            Some("kill") => Ok(Command::Bulk(BulkAction::Kill)),
            Some("delete") => Ok(Command::Bulk(BulkAction::Delete)),
            _ => Err("'b' needs one of run, kill, delete".to_string()),
        },
        "h" | "help" | "?" => Ok(Command::Help),
        "q" | "quit" => Ok(Command::Quit),
        other => Err(format!("unknown command '{other}'")),
    }
}

/// Maps a command onto the intent it stands for in the current view.
pub fn resolve(command: Command, view: &DeadTasksView) -> Resolved {
    let table = match &view.content {
        ListContent::Table(table) => Some(table),
        ListContent::Loading | ListContent::Empty { .. } => None,
    };

    match command {
        Command::Quit => Resolved::Quit,
        Command::Help => Resolved::Help,
        Command::NextPage => match table {
            Some(table) => {
                Resolved::Msg(Msg::PageChanged(table.pagination.page_index.saturating_add(1)))
            }
            None => Resolved::Rejected("no page to move from".to_string()),
        },
        Command::PreviousPage => match table.map(|t| t.pagination.page_index) {
            Some(index) if index > 0 => Resolved::Msg(Msg::PageChanged(index - 1)),
            Some(_) => Resolved::Rejected("already on the first page".to_string()),
            None => Resolved::Msg(Msg::PageChanged(0)),
        },
        Command::GoToPage(page) => Resolved::Msg(Msg::PageChanged(page - 1)),
        Command::PageSize(size) => Resolved::Msg(Msg::PageSizeChanged(size)),
        Command::ToggleSelectAll => match table {
            Some(table) => {
                Resolved::Msg(Msg::SelectAllToggled(table.select_all != CheckState::Checked))
            }
            None => Resolved::Rejected("nothing to select".to_string()),
        },
        Command::ToggleRow(row) => with_row(table, row, |r| Msg::RowSelectToggled {
            id: r.id.clone(),
            checked: !r.selected,
        }),
        Command::Expand(row) => with_row(table, row, |r| Msg::ExpandToggled { id: r.id.clone() }),
        Command::Delete(row) => match row_at(table, row) {
            Ok(r) if !r.delete_enabled => {
                Resolved::Rejected(format!("delete of row {row} is already pending"))
            }
            Ok(r) => Resolved::Msg(Msg::DeleteClicked { key: r.key.clone() }),
            Err(reason) => Resolved::Rejected(reason),
        },
        Command::Bulk(action) => match table {
            Some(table) if !table.toolbar.bulk_actions.is_empty() => {
                Resolved::Msg(Msg::BulkActionClicked(action))
            }
            _ => Resolved::Rejected("select rows before using bulk actions".to_string()),
        },
    }
}

fn row_at(table: Option<&TableView>, row: usize) -> Result<&RowView, String> {
    table
        .and_then(|table| table.rows.get(row.wrapping_sub(1)))
        .ok_or_else(|| format!("no row {row} on this page"))
}

fn with_row(
    table: Option<&TableView>,
    row: usize,
    to_msg: impl FnOnce(&RowView) -> Msg,
) -> Resolved {
    match row_at(table, row) {
        Ok(r) => Resolved::Msg(to_msg(r)),
        Err(reason) => Resolved::Rejected(reason),
    }
}
