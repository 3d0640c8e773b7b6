use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveFolder {
    pub id: String,
    pub name: String,
}

/// One page of `GET /api/oauth/drive-files`. The token is camelCase on the
/// wire because the backend forwards the Drive API response untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveFolderPage {
    #[serde(default)]
    pub files: Vec<DriveFolder>,
    #[serde(rename = "nextPageToken", default)]
    pub next_page_token: Option<String>,
}
