//! Terminal dashboard for the ProRank resume-screening backend.
//!
//! The backend owns every business rule (scoring, job scheduling, sessions).
//! This crate fetches its data, keeps a little client-side state (the session
//! token and per-job filters), and renders the pages of the dashboard as text.

pub mod backend;
pub mod config;
pub mod errors;
pub mod models;
pub mod render;
pub mod route;
pub mod scoring;
pub mod storage;
pub mod stores;
pub mod views;
