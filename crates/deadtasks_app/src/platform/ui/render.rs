use deadtasks_core::{CheckState, DeadTasksView, ListContent, RowView, TableView};

const ERROR_WIDTH: usize = 48;

/// Renders the whole screen for `view`; `status` is the one-line prompt feedback.
pub fn render(view: &DeadTasksView, status: Option<&str>) -> String {
    let mut out = String::new();
    let activity = if view.loading { " (refreshing…)" } else { "" };
    out.push_str(&format!("Dead tasks in queue '{}'{}\n", view.queue, activity));
    if let Some(error) = &view.last_error {
        out.push_str(&format!("! Could not refresh: {error}\n"));
    }
    out.push('\n');

    match &view.content {
        ListContent::Loading => out.push_str("Loading…\n"),
        ListContent::Empty { message } => out.push_str(&format!("[Info] {message}\n")),
        ListContent::Table(table) => render_table(&mut out, table),
    }

    if let Some(status) = status {
        out.push('\n');
        out.push_str(status);
        out.push('\n');
    }
    out
}

fn render_table(out: &mut String, table: &TableView) {
    if table.toolbar.selected_count > 0 {
        let actions: Vec<_> = table
            .toolbar
            .bulk_actions
            .iter()
            .map(|action| action.label())
            .collect();
        out.push_str(&format!(
            "{} selected | {}\n",
            table.toolbar.selected_count,
            actions.join(" | ")
        ));
    }

    let headers: Vec<_> = table.columns.iter().map(|column| column.label()).collect();
    out.push_str(&format!(
        "{:>3} {} {}\n",
        "#",
        checkbox(table.select_all),
        headers.join(" | ")
    ));

    for (index, row) in table.rows.iter().enumerate() {
        render_row(out, index + 1, row);
    }

    let pagination = &table.pagination;
    let sizes: Vec<_> = pagination
        .page_size_options
        .iter()
        .map(|size| {
            if *size == pagination.page_size {
                format!("[{size}]")
            } else {
                size.to_string()
            }
        })
        .collect();
    out.push_str(&format!(
        "\nPage {} of {} | {} total | rows per page: {}\n",
        pagination.page_index.saturating_add(1),
        pagination.page_count,
        pagination.total_count,
        sizes.join(" ")
    ));
}

fn render_row(out: &mut String, number: usize, row: &RowView) {
    let arrow = if row.expanded { "v" } else { ">" };
    let action = if row.delete_enabled {
        "Delete"
    } else {
        "Deleting…"
    };
    out.push_str(&format!(
        "{:>3} {} {} | {} | {} | {} | {} | {}\n",
        number,
        checkbox(if row.selected {
            CheckState::Checked
        } else {
            CheckState::Unchecked
        }),
        arrow,
        row.id,
        row.task_type,
        row.last_failed,
        truncate(&row.error_message, ERROR_WIDTH),
        action
    ));

    if let Some(payload) = &row.payload {
        out.push_str("      Payload\n");
        for line in payload.lines() {
            out.push_str("      ");
            out.push_str(line);
            out.push('\n');
        }
    }
}

fn checkbox(state: CheckState) -> &'static str {
    match state {
        CheckState::Unchecked => "[ ]",
        CheckState::Checked => "[x]",
        CheckState::Indeterminate => "[-]",
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
