use std::fmt::Write;

use super::{badge, format_long_date, render_shell, Table, LOADING};
use crate::stores::AuthStore;
use crate::views::JobsView;

pub const NO_JOBS: &str = "No jobs found";

pub fn render_jobs_page(auth: &AuthStore, view: &JobsView) -> String {
    if auth.is_initializing() {
        return format!("{LOADING}\n");
    }

    let mut body = String::new();
    let _ = writeln!(body, "Manage and review resume screening jobs");
    if auth.is_authenticated() {
        let _ = writeln!(body, "[+ New Review Job]  prorank new-job");
    } else {
        let _ = writeln!(body, "[+ New Review Job]  (sign in first)");
    }
    let _ = writeln!(body);

    if view.is_refreshing() {
        let _ = writeln!(body, "Refreshing...");
    }

    let mut table = Table::new(&["Job Name", "Folder Name", "Status", "Created"])
        .with_empty_message(NO_JOBS);
    for job in view.jobs() {
        table.push_row(vec![
            format!("{} (#{})", job.name, job.id),
            job.folder_name.clone(),
            badge(job.status.as_str(), job.status.badge()),
            format_long_date(job.created_at),
        ]);
    }
    body.push_str(&table.render());

    render_shell(auth, &body)
}
