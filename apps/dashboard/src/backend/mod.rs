/// Backend client: the single point of entry for every ProRank API call.
///
/// Views and stores never build requests themselves; they hold an
/// `Arc<dyn Backend>` so tests can swap in a fake.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use tracing::debug;

use crate::errors::ClientError;
use crate::models::{
    DriveFolderPage, Filter, Job, Resume, ResumeListing, StartJobAck, StartJobRequest, User,
};
use crate::storage::{load_session, KeyValueStore};

pub mod endpoints;

#[cfg(test)]
pub mod fake;

/// Name of the cookie the backend reads its session JWT from.
pub const SESSION_COOKIE: &str = "access_token";

#[async_trait]
pub trait Backend: Send + Sync {
    /// Origin every endpoint path is joined to.
    fn base_url(&self) -> &str;

    /// Browser target that starts the OAuth login flow.
    fn authorize_url(&self) -> String {
        format!("{}{}", self.base_url(), endpoints::AUTHORIZE)
    }

    async fn me(&self) -> Result<User, ClientError>;

    async fn logout(&self) -> Result<(), ClientError>;

    async fn drive_folders(
        &self,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<DriveFolderPage, ClientError>;

    async fn start_job(&self, request: &StartJobRequest) -> Result<StartJobAck, ClientError>;

    async fn jobs(&self) -> Result<Vec<Job>, ClientError>;

    /// Only the set flags of `filter` are sent.
    async fn resumes(&self, job_id: i64, filter: &Filter) -> Result<ResumeListing, ClientError>;

    async fn resume(&self, resume_id: i64) -> Result<Resume, ClientError>;
}

/// FastAPI error envelope: `{"detail": ...}`.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    detail: Value,
}

/// `Backend` over HTTP. Every request is credentialed: the session token
/// persisted in storage is presented as the `access_token` cookie.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    storage: Arc<dyn KeyValueStore>,
}

impl HttpBackend {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        storage: Arc<dyn KeyValueStore>,
    ) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base_url,
            storage,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn credentialed(&self, request: RequestBuilder) -> RequestBuilder {
        match load_session(self.storage.as_ref()) {
            Some(token) => request.header(header::COOKIE, format!("{SESSION_COOKIE}={token}")),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        debug!("GET {path} {query:?}");
        let response = self
            .credentialed(self.client.get(self.url(path)).query(query))
            .send()
            .await?;
        decode(response).await
    }
}

#[async_trait]
impl Backend for HttpBackend {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn me(&self) -> Result<User, ClientError> {
        self.get_json(endpoints::ME, &[]).await
    }

    async fn logout(&self) -> Result<(), ClientError> {
        debug!("POST {}", endpoints::LOGOUT);
        let response = self
            .credentialed(self.client.post(self.url(endpoints::LOGOUT)))
            .send()
            .await?;
        ensure_success(response).await.map(|_| ())
    }

    async fn drive_folders(
        &self,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<DriveFolderPage, ClientError> {
        let mut query = vec![("page_size", page_size.to_string())];
        if let Some(token) = page_token {
            query.push(("next_page_token", token.to_string()));
        }
        self.get_json(endpoints::DRIVE_FILES, &query).await
    }

    async fn start_job(&self, request: &StartJobRequest) -> Result<StartJobAck, ClientError> {
        debug!("POST {} {request:?}", endpoints::START_JOB);
        let response = self
            .credentialed(self.client.post(self.url(endpoints::START_JOB)))
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    async fn jobs(&self) -> Result<Vec<Job>, ClientError> {
        self.get_json(endpoints::GET_JOBS, &[]).await
    }

    async fn resumes(&self, job_id: i64, filter: &Filter) -> Result<ResumeListing, ClientError> {
        let mut query = vec![("job_id", job_id.to_string())];
        query.extend(
            filter
                .query_pairs()
                .into_iter()
                .map(|(flag, value)| (flag, value.to_string())),
        );
        self.get_json(endpoints::GET_RESUMES, &query).await
    }

    async fn resume(&self, resume_id: i64) -> Result<Resume, ClientError> {
        self.get_json(endpoints::GET_RESUME, &[("resume_id", resume_id.to_string())])
            .await
    }
}

/// Maps non-2xx responses to `ClientError`, passing successful ones through.
async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(ClientError::Unauthorized);
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Api {
            status: status.as_u16(),
            message: error_message(body),
        });
    }
    Ok(response)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let response = ensure_success(response).await?;
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(ClientError::Parse)
}

/// Pulls `detail` out of a FastAPI error body, falling back to the raw text.
fn error_message(body: String) -> String {
    match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(ApiErrorBody {
            detail: Value::String(detail),
        }) => detail,
        Ok(ApiErrorBody { detail }) => detail.to_string(),
        Err(_) => body,
    }
}
