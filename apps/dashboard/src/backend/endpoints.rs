//! Backend paths, relative to the configured base URL.

pub const ME: &str = "/api/oauth/me";
pub const LOGOUT: &str = "/api/oauth/logout";
pub const AUTHORIZE: &str = "/api/oauth/authorize";
pub const DRIVE_FILES: &str = "/api/oauth/drive-files";
pub const START_JOB: &str = "/api/job/start-job";
pub const GET_JOBS: &str = "/api/query/get-jobs";
pub const GET_RESUMES: &str = "/api/query/get-resumes";
pub const GET_RESUME: &str = "/api/query/get-resume";
