use std::sync::Arc;

use tracing::{error, info, warn};

use super::Landing;
use crate::backend::Backend;
use crate::errors::WizardError;
use crate::models::{DriveFolder, StartJobRequest};
use crate::route::Route;
use crate::stores::AuthStore;

/// Name sent when the job name is blank.
pub const UNTITLED_JOB: &str = "Untitled Job";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    SelectFolder = 1,
    NameJob = 2,
    Review = 3,
}

impl WizardStep {
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::SelectFolder => "Select Google Drive Folder",
            WizardStep::NameJob => "Job Details",
            WizardStep::Review => "Review & Start Job",
        }
    }
}

/// Three-step "create review job" flow: pick a Drive folder, name the job,
/// review and submit. Moving between steps never discards earlier input.
pub struct NewJobWizard {
    backend: Arc<dyn Backend>,
    page_size: u32,
    step: WizardStep,
    folders: Vec<DriveFolder>,
    next_page_token: Option<String>,
    selected: Option<DriveFolder>,
    job_name: String,
    is_loading: bool,
    is_submitting: bool,
}

impl NewJobWizard {
    pub fn new(backend: Arc<dyn Backend>, page_size: u32) -> Self {
        Self {
            backend,
            page_size,
            step: WizardStep::SelectFolder,
            folders: Vec::new(),
            next_page_token: None,
            selected: None,
            job_name: String::new(),
            is_loading: false,
            is_submitting: false,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn folders(&self) -> &[DriveFolder] {
        &self.folders
    }

    pub fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }

    pub fn selected_folder(&self) -> Option<&DriveFolder> {
        self.selected.as_ref()
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Resolves auth and loads the first page of folders.
    pub async fn mount(&mut self, auth: &mut AuthStore) -> Landing {
        if !auth.fetch_user().await {
            return Landing::Redirect(Route::Root);
        }
        self.first_page().await;
        Landing::Render
    }

    /// Forgets the pagination token and loads from the start.
    pub async fn first_page(&mut self) {
        self.next_page_token = None;
        self.load_folders(None).await;
    }

    /// Loads the page after the last one. With no token left this is the
    /// first page again.
    pub async fn next_page(&mut self) {
        let token = self.next_page_token.clone();
        self.load_folders(token).await;
    }

    async fn load_folders(&mut self, token: Option<String>) {
        self.is_loading = true;
        match self
            .backend
            .drive_folders(self.page_size, token.as_deref())
            .await
        {
            Ok(page) => {
                info!("Loaded {} drive folders", page.files.len());
                self.folders = page.files;
                self.next_page_token = page.next_page_token.filter(|t| !t.is_empty());
            }
            Err(e) => {
                warn!("Error fetching drive files: {e}");
                self.folders.clear();
                self.next_page_token = None;
            }
        }
        self.is_loading = false;
    }

    pub fn select_folder(&mut self, folder: DriveFolder) -> Result<(), WizardError> {
        self.require_step(WizardStep::SelectFolder)?;
        self.selected = Some(folder);
        Ok(())
    }

    /// Selects a folder from the currently listed page by position.
    pub fn select_listed(&mut self, index: usize) -> Result<(), WizardError> {
        let folder = self
            .folders
            .get(index)
            .cloned()
            .ok_or(WizardError::NoFolderSelected)?;
        self.select_folder(folder)
    }

    /// Step 1 → 2. Requires a selected folder.
    pub fn continue_to_name(&mut self) -> Result<(), WizardError> {
        self.require_step(WizardStep::SelectFolder)?;
        if self.selected.is_none() {
            return Err(WizardError::NoFolderSelected);
        }
        self.step = WizardStep::NameJob;
        Ok(())
    }

    pub fn set_job_name(&mut self, name: impl Into<String>) -> Result<(), WizardError> {
        self.require_step(WizardStep::NameJob)?;
        self.job_name = name.into();
        Ok(())
    }

    /// Step 2 → 3. Requires a non-blank name.
    pub fn continue_to_review(&mut self) -> Result<(), WizardError> {
        self.require_step(WizardStep::NameJob)?;
        if self.job_name.trim().is_empty() {
            return Err(WizardError::BlankJobName);
        }
        self.step = WizardStep::Review;
        Ok(())
    }

    pub fn back(&mut self) -> Result<(), WizardError> {
        if self.is_submitting {
            return Err(WizardError::AlreadySubmitting);
        }
        self.step = match self.step {
            WizardStep::SelectFolder => WizardStep::SelectFolder,
            WizardStep::NameJob => WizardStep::SelectFolder,
            WizardStep::Review => WizardStep::NameJob,
        };
        Ok(())
    }

    /// Review shortcut back to the folder picker.
    pub fn change_folder(&mut self) -> Result<(), WizardError> {
        self.require_step(WizardStep::Review)?;
        self.step = WizardStep::SelectFolder;
        Ok(())
    }

    /// Review shortcut back to the name field.
    pub fn edit_name(&mut self) -> Result<(), WizardError> {
        self.require_step(WizardStep::Review)?;
        self.step = WizardStep::NameJob;
        Ok(())
    }

    /// The body `submit` will POST.
    pub fn start_request(&self) -> Option<StartJobRequest> {
        let folder = self.selected.as_ref()?;
        let name = if self.job_name.trim().is_empty() {
            UNTITLED_JOB.to_string()
        } else {
            self.job_name.clone()
        };
        Some(StartJobRequest {
            folder_id: folder.id.clone(),
            folder_name: folder.name.clone(),
            name,
        })
    }

    /// Starts the job and returns to the dashboard root.
    ///
    /// The backend's answer does not change where we go: a rejected job is
    /// only logged, so the user sees the same outcome as for a success.
    pub async fn submit(&mut self) -> Result<Route, WizardError> {
        self.require_step(WizardStep::Review)?;
        if self.is_submitting {
            return Err(WizardError::AlreadySubmitting);
        }
        let request = self
            .start_request()
            .ok_or(WizardError::NoFolderSelected)?;

        self.is_submitting = true;
        match self.backend.start_job(&request).await {
            Ok(ack) => info!(
                "Started job '{}': {}",
                request.name,
                ack.message.as_deref().unwrap_or("ok")
            ),
            Err(e) => error!("Error starting job '{}': {e}", request.name),
        }
        self.is_submitting = false;
        Ok(Route::Root)
    }

    fn require_step(&self, step: WizardStep) -> Result<(), WizardError> {
        if self.step == step {
            Ok(())
        } else {
            Err(WizardError::WrongStep(self.step.number()))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::backend::fake::{folder, FakeBackend};
    use crate::models::DriveFolderPage;
    use crate::storage::MemoryStorage;

    fn paged_backend() -> FakeBackend {
        let mut folder_pages = HashMap::new();
        folder_pages.insert(
            String::new(),
            DriveFolderPage {
                files: vec![folder("f1", "Fall 2024"), folder("f2", "Spring 2025")],
                next_page_token: Some("tok-2".to_string()),
            },
        );
        folder_pages.insert(
            "tok-2".to_string(),
            DriveFolderPage {
                files: vec![folder("f3", "Archive")],
                next_page_token: None,
            },
        );
        FakeBackend {
            folder_pages,
            ..FakeBackend::signed_in()
        }
    }

    async fn mounted(backend: FakeBackend) -> (NewJobWizard, Arc<FakeBackend>, Landing) {
        let backend = Arc::new(backend);
        let mut auth = AuthStore::new(backend.clone(), Arc::new(MemoryStorage::new()));
        let mut wizard = NewJobWizard::new(backend.clone(), 50);
        let landing = wizard.mount(&mut auth).await;
        (wizard, backend, landing)
    }

    async fn at_review(backend: FakeBackend) -> (NewJobWizard, Arc<FakeBackend>) {
        let (mut wizard, backend, _) = mounted(backend).await;
        wizard.select_listed(0).unwrap();
        wizard.continue_to_name().unwrap();
        wizard.set_job_name("Fall 2024 Internship Applicants").unwrap();
        wizard.continue_to_review().unwrap();
        (wizard, backend)
    }

    #[tokio::test]
    async fn test_mount_loads_first_page() {
        let (wizard, backend, landing) = mounted(paged_backend()).await;
        assert_eq!(landing, Landing::Render);
        assert_eq!(wizard.folders().len(), 2);
        assert_eq!(wizard.next_page_token(), Some("tok-2"));
        assert_eq!(
            backend.calls_to("/api/oauth/drive-files"),
            vec!["GET /api/oauth/drive-files?page_size=50".to_string()]
        );
    }

    #[tokio::test]
    async fn test_mount_without_session_redirects() {
        let (wizard, backend, landing) = mounted(FakeBackend::new()).await;
        assert_eq!(landing, Landing::Redirect(Route::Root));
        assert!(wizard.folders().is_empty());
        assert!(backend.calls_to("/api/oauth/drive-files").is_empty());
    }

    #[tokio::test]
    async fn test_pagination_next_then_first() {
        let (mut wizard, backend, _) = mounted(paged_backend()).await;

        wizard.next_page().await;
        assert_eq!(wizard.folders()[0].name, "Archive");
        assert_eq!(wizard.next_page_token(), None);

        wizard.first_page().await;
        assert_eq!(wizard.folders().len(), 2);

        let calls = backend.calls_to("/api/oauth/drive-files");
        assert_eq!(
            calls[1],
            "GET /api/oauth/drive-files?page_size=50&next_page_token=tok-2"
        );
        assert_eq!(calls[2], "GET /api/oauth/drive-files?page_size=50");
    }

    #[tokio::test]
    async fn test_folder_fetch_failure_empties_list() {
        let (wizard, _, landing) = mounted(FakeBackend::signed_in()).await;
        assert_eq!(landing, Landing::Render);
        assert!(wizard.folders().is_empty());
        assert_eq!(wizard.next_page_token(), None);
        assert!(!wizard.is_loading());
    }

    #[tokio::test]
    async fn test_cannot_advance_without_folder() {
        let (mut wizard, _, _) = mounted(paged_backend()).await;
        assert_eq!(
            wizard.continue_to_name(),
            Err(WizardError::NoFolderSelected)
        );
        assert_eq!(wizard.step(), WizardStep::SelectFolder);
    }

    #[tokio::test]
    async fn test_cannot_advance_with_blank_name() {
        let (mut wizard, _, _) = mounted(paged_backend()).await;
        wizard.select_listed(1).unwrap();
        wizard.continue_to_name().unwrap();
        wizard.set_job_name("   ").unwrap();
        assert_eq!(wizard.continue_to_review(), Err(WizardError::BlankJobName));
        assert_eq!(wizard.step(), WizardStep::NameJob);
    }

    #[tokio::test]
    async fn test_review_shortcuts_keep_input() {
        let (mut wizard, _) = at_review(paged_backend()).await;

        wizard.change_folder().unwrap();
        assert_eq!(wizard.step(), WizardStep::SelectFolder);
        assert_eq!(wizard.selected_folder().unwrap().id, "f1");
        assert_eq!(wizard.job_name(), "Fall 2024 Internship Applicants");

        wizard.continue_to_name().unwrap();
        wizard.continue_to_review().unwrap();
        wizard.edit_name().unwrap();
        assert_eq!(wizard.step(), WizardStep::NameJob);
        assert_eq!(wizard.job_name(), "Fall 2024 Internship Applicants");
    }

    #[tokio::test]
    async fn test_submit_posts_selection() {
        let (mut wizard, backend) = at_review(paged_backend()).await;

        let route = wizard.submit().await.unwrap();

        assert_eq!(route, Route::Root);
        let started = backend.started.lock().unwrap().clone();
        assert_eq!(
            started,
            vec![StartJobRequest {
                folder_id: "f1".to_string(),
                folder_name: "Fall 2024".to_string(),
                name: "Fall 2024 Internship Applicants".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_submit_failure_still_navigates_home() {
        let backend = FakeBackend {
            start_job_fails: true,
            ..paged_backend()
        };
        let (mut wizard, backend) = at_review(backend).await;

        assert_eq!(wizard.submit().await, Ok(Route::Root));
        assert!(!wizard.is_submitting());
        assert_eq!(backend.calls_to("/api/job/start-job").len(), 1);
    }

    #[tokio::test]
    async fn test_submit_only_from_review() {
        let (mut wizard, _, _) = mounted(paged_backend()).await;
        assert_eq!(wizard.submit().await, Err(WizardError::WrongStep(1)));
    }

    #[test]
    fn test_blank_name_defaults_to_untitled() {
        let mut wizard = NewJobWizard::new(Arc::new(FakeBackend::new()), 50);
        wizard.select_folder(folder("f9", "Misc")).unwrap();
        assert_eq!(wizard.start_request().unwrap().name, UNTITLED_JOB);
    }
}
