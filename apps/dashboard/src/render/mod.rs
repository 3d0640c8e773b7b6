//! Text rendering of the dashboard pages. Everything here is a pure function
//! of store and view state; nothing touches the network.

pub mod job_detail;
pub mod jobs;
pub mod resume_detail;
pub mod shell;
pub mod table;
pub mod wizard;

pub use job_detail::{render_filter_menu, render_job_detail_page};
pub use jobs::render_jobs_page;
pub use resume_detail::render_resume_detail_page;
pub use shell::render_shell;
pub use table::Table;
pub use wizard::render_wizard_page;

use chrono::{DateTime, Utc};

use crate::models::BadgeVariant;

pub const LOADING: &str = "Loading...";

/// Whole numbers print without a fraction, everything else as-is.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

pub fn format_optional(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_else(|| "N/A".to_string())
}

/// `Oct 1, 2024`
pub fn format_long_date(date: DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `10/1/2024`
pub fn format_short_date(date: DateTime<Utc>) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// Badge text; the variant picks the bracket style.
pub fn badge(label: &str, variant: BadgeVariant) -> String {
    match variant {
        BadgeVariant::Default => format!("[{label}]"),
        BadgeVariant::Secondary => format!("({label})"),
        BadgeVariant::Outline => format!("<{label}>"),
        BadgeVariant::Destructive => format!("!{label}!"),
    }
}

/// A fixed-width bar, e.g. `[#######-------------]`.
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
