use std::fmt::Write;

use crate::stores::AuthStore;

const TITLE: &str = "Resume Review Jobs";

/// Dashboard chrome around a page body: title, login/logout action and the
/// signed-in account.
pub fn render_shell(auth: &AuthStore, body: &str) -> String {
    let mut out = String::new();

    let action = if !auth.is_initializing() && auth.user().is_none() {
        "Login"
    } else {
        "Log Out"
    };
    let account = match auth.user() {
        Some(user) if !auth.is_initializing() => user.email.as_str(),
        _ => "",
    };

    let _ = writeln!(out, "ProRank | {TITLE}");
    if account.is_empty() {
        let _ = writeln!(out, "[{action}]");
    } else {
        let _ = writeln!(out, "[{action}]  {account}");
    }
    let _ = writeln!(out, "{}", "=".repeat(60));
    out.push_str(body);
    if !body.ends_with('\n') {
        out.push('\n');
    }
    out
}
