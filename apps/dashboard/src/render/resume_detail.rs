use std::fmt::Write;

use super::{format_number, format_optional, progress_bar, render_shell, LOADING};
use crate::stores::AuthStore;
use crate::views::ResumeDetailView;

const BAR_WIDTH: usize = 20;

pub fn render_resume_detail_page(auth: &AuthStore, view: &ResumeDetailView) -> String {
    if auth.is_initializing() || view.is_loading() || !auth.is_authenticated() {
        return format!("{LOADING}\n");
    }

    let mut body = String::new();
    let Some(resume) = view.resume() else {
        let _ = writeln!(body, "Jobs > Job #{}", view.job_id());
        let _ = writeln!(body);
        let _ = writeln!(body, "Resume not found");
        return render_shell(auth, &body);
    };

    let title = resume
        .candidate_name
        .as_deref()
        .unwrap_or_else(|| resume.file_name_or_empty());
    let _ = writeln!(body, "Jobs > Job #{} > {title}", view.job_id());
    let _ = writeln!(body);

    let _ = writeln!(body, "Resume Preview");
    match resume.preview_url.as_deref().or(resume.view_url.as_deref()) {
        Some(url) => {
            let _ = writeln!(body, "  {url}");
        }
        None => {
            let _ = writeln!(body, "  No preview available");
        }
    }
    let _ = writeln!(body);

    let _ = writeln!(body, "Overall Score");
    let _ = writeln!(body, "Composite evaluation across all categories");
    let _ = writeln!(body, "  {}/100", format_optional(resume.score));
    if let Some(recommendation) = view.recommendation() {
        let _ = writeln!(body, "  {}", recommendation.text());
    }
    let _ = writeln!(body);

    let _ = writeln!(body, "Academic Profile");
    let _ = writeln!(
        body,
        "  GPA:         {}",
        resume
            .gpa
            .map(|g| format!("{g:.2}"))
            .unwrap_or_else(|| "N/A".to_string())
    );
    let _ = writeln!(body, "  Internships: {}", resume.num_internships.unwrap_or(0));
    let _ = writeln!(
        body,
        "  School Year: {}",
        resume.school_year.as_deref().unwrap_or("N/A")
    );
    let _ = writeln!(body);

    let _ = writeln!(body, "Score Breakdown");
    let _ = writeln!(body, "Performance across evaluation categories");
    for bar in view.breakdown() {
        let value = bar
            .value
            .map(format_number)
            .unwrap_or_else(|| "N/A".to_string());
        let _ = writeln!(
            body,
            "  {:<15} {} {value}/{}",
            bar.label,
            progress_bar(bar.fraction(), BAR_WIDTH),
            format_number(bar.max)
        );
    }

    render_shell(auth, &body)
}
