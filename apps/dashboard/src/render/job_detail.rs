use std::fmt::Write;

use super::{
    badge, format_number, format_optional, format_short_date, render_shell, Table, LOADING,
};
use crate::models::{BadgeVariant, Filter, FilterField, ResumeStatus};
use crate::scoring::ScoreIndicator;
use crate::stores::AuthStore;
use crate::views::JobDetailView;

fn status_badge(status: ResumeStatus) -> String {
    let variant = match status {
        ResumeStatus::Scored => BadgeVariant::Default,
        ResumeStatus::Pending => BadgeVariant::Outline,
        ResumeStatus::Failed => BadgeVariant::Destructive,
    };
    badge(status.label(), variant)
}

/// Checkbox list of the six flags, grouped like the dropdown menu.
pub fn render_filter_menu(filter: &Filter) -> String {
    let mut out = String::new();
    let active = filter.active_count();
    if active > 0 {
        let _ = writeln!(out, "Filters ({active} active)");
    } else {
        let _ = writeln!(out, "Filters");
    }

    let mut group = |title: &str, fields: &[FilterField]| {
        let _ = writeln!(out, "  {title}");
        for field in fields {
            let mark = if filter.get(*field) { "x" } else { " " };
            let _ = writeln!(out, "    [{mark}] {field}");
        }
    };
    group("School Year", &FilterField::SCHOOL_YEARS[..]);
    group("Status", &FilterField::OUTCOMES[..]);
    out
}

pub fn render_job_detail_page(auth: &AuthStore, view: &JobDetailView) -> String {
    if auth.is_initializing() || view.is_loading() || !auth.is_authenticated() {
        return format!("{LOADING}\n");
    }

    let mut body = String::new();
    let name = if view.job_name().is_empty() {
        LOADING
    } else {
        view.job_name()
    };
    let date = view
        .job_date()
        .map(format_short_date)
        .unwrap_or_else(|| "Unknown Date".to_string());
    let stats = view.stats();

    let _ = writeln!(body, "Jobs > {name}");
    let _ = writeln!(body);
    let _ = writeln!(body, "{name}");
    let _ = writeln!(body, "{} Applications  |  {date}", stats.num_resumes);
    if view.is_refreshing() {
        let _ = writeln!(body, "Refreshing...");
    }
    let _ = writeln!(body);
    let _ = writeln!(body, "Total Resumes: {}", stats.num_resumes);
    let _ = writeln!(body, "Average Score: {}", format_number(stats.average_score));
    let _ = writeln!(body, "Top Score:     {}", format_number(stats.high_score));
    let _ = writeln!(body, "Lowest Score:  {}", format_number(stats.lowest_score));
    let _ = writeln!(body);

    let _ = writeln!(body, "Resume Analysis");
    let _ = writeln!(body, "Detailed breakdown of each candidate's evaluation");
    let _ = writeln!(body, "Search: \"{}\"", view.search());
    body.push_str(&render_filter_menu(&view.filter()));
    if view.is_filtering() {
        let _ = writeln!(body, "Filtering...");
    }
    let _ = writeln!(body);

    let mut table = Table::new(&[
        "Candidate",
        "Score",
        "GPA",
        "Number of Internships",
        "School Year",
        "Status",
    ])
    .with_empty_message(format!(
        "No candidates found matching \"{}\"",
        view.search()
    ));
    for resume in view.visible_resumes() {
        let indicator = ScoreIndicator::for_optional(resume.score);
        table.push_row(vec![
            format!("{} (#{})", resume.file_name_or_empty(), resume.id),
            format!("{} {}", format_optional(resume.score), indicator.symbol()),
            resume
                .gpa
                .map(|g| format!("{g:.2}"))
                .unwrap_or_else(|| "N/A".to_string()),
            resume
                .num_internships
                .map(|n| n.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            resume
                .school_year
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            status_badge(resume.status),
        ]);
    }
    body.push_str(&table.render());

    render_shell(auth, &body)
}
