use std::fmt::Write;

use super::{render_shell, LOADING};
use crate::stores::AuthStore;
use crate::views::{NewJobWizard, WizardStep};

fn step_indicator(current: WizardStep) -> String {
    [WizardStep::SelectFolder, WizardStep::NameJob, WizardStep::Review]
        .into_iter()
        .map(|step| {
            if step <= current {
                format!("({})", step.number())
            } else {
                format!(" {} ", step.number())
            }
        })
        .collect::<Vec<_>>()
        .join("---")
}

pub fn render_wizard_page(auth: &AuthStore, wizard: &NewJobWizard) -> String {
    if auth.is_initializing() || !auth.is_authenticated() {
        return format!("{LOADING}\n");
    }

    let mut body = String::new();
    let _ = writeln!(body, "Jobs > New Job");
    let _ = writeln!(body, "Create Resume Review Job");
    let _ = writeln!(body, "{}", step_indicator(wizard.step()));
    let _ = writeln!(body);
    let _ = writeln!(body, "{}", wizard.step().title());

    match wizard.step() {
        WizardStep::SelectFolder => {
            let _ = writeln!(body, "Choose a folder containing PDF resumes to review");
            if wizard.is_loading() {
                let _ = writeln!(body, "  Loading folders...");
            } else if wizard.folders().is_empty() {
                let _ = writeln!(body, "  No folders found");
            } else {
                let selected = wizard.selected_folder().map(|f| f.id.as_str());
                for (i, folder) in wizard.folders().iter().enumerate() {
                    let mark = if selected == Some(folder.id.as_str()) {
                        "*"
                    } else {
                        " "
                    };
                    let _ = writeln!(body, "  {mark} {:>3}. {}", i + 1, folder.name);
                }
            }
            let more = if wizard.next_page_token().is_some() {
                "[f] First Page  [n] Next Page"
            } else {
                "[f] First Page"
            };
            let _ = writeln!(body, "{more}  [c] Continue");
        }
        WizardStep::NameJob => {
            let _ = writeln!(body, "Name your job");
            let _ = writeln!(body, "  Job Name: {}", wizard.job_name());
            let _ = writeln!(body, "[b] Back  [c] Continue");
        }
        WizardStep::Review => {
            let _ = writeln!(
                body,
                "Review your settings and start the resume review process"
            );
            let folder = wizard
                .selected_folder()
                .map(|f| f.name.as_str())
                .unwrap_or("");
            let _ = writeln!(body, "  Selected Folder: {folder}  [f] Change");
            let _ = writeln!(body, "  Job Name:        {}  [e] Edit", wizard.job_name());
            if wizard.is_submitting() {
                let _ = writeln!(body, "Starting Job...");
            } else {
                let _ = writeln!(body, "[b] Back  [s] Start Review Job");
            }
        }
    }

    render_shell(auth, &body)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use super::*;
    use crate::backend::fake::{folder, FakeBackend};
    use crate::models::DriveFolderPage;
    use crate::storage::MemoryStorage;

    fn with_folders(backend: FakeBackend) -> Arc<FakeBackend> {
        let page = DriveFolderPage {
            files: vec![folder("f1", "Fall 2024 Resumes")],
            next_page_token: None,
        };
        Arc::new(FakeBackend {
            folder_pages: HashMap::from([(String::new(), page)]),
            ..backend
        })
    }

    #[test]
    fn test_step_indicator_fills_completed_steps() {
        assert_eq!(step_indicator(WizardStep::SelectFolder), "(1)--- 2 --- 3 ");
        assert_eq!(step_indicator(WizardStep::Review), "(1)---(2)---(3)");
    }

    #[tokio::test]
    async fn test_signed_in_page_lists_folders() {
        let backend = with_folders(FakeBackend::signed_in());
        let mut auth = AuthStore::new(backend.clone(), Arc::new(MemoryStorage::new()));
        let mut wizard = NewJobWizard::new(backend, 50);
        wizard.mount(&mut auth).await;

        let out = render_wizard_page(&auth, &wizard);
        assert!(out.contains("1. Fall 2024 Resumes"));
        assert!(out.contains("recruiter@example.com"));
    }

    #[tokio::test]
    async fn test_initializing_and_anonymous_pages_hide_the_picker() {
        let backend = with_folders(FakeBackend::new());
        let mut auth = AuthStore::new(backend.clone(), Arc::new(MemoryStorage::new()));
        let mut wizard = NewJobWizard::new(backend.clone(), 50);
        wizard.first_page().await;
        assert_eq!(wizard.folders().len(), 1);

        assert!(auth.is_initializing());
        assert_eq!(render_wizard_page(&auth, &wizard), format!("{LOADING}\n"));

        assert!(!auth.fetch_user().await);
        let out = render_wizard_page(&auth, &wizard);
        assert_eq!(out, format!("{LOADING}\n"));
        assert!(!out.contains("Fall 2024 Resumes"));
    }
}
