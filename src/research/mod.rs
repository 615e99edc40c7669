//! # Research Service
//!
//! Everything that talks to the answering backend lives here. The core only
//! sees the [`AnsweringService`] trait; the HTTP details stay in [`client`].

pub mod client;
pub mod service;
pub mod types;

pub use client::HttpResearchClient;
pub use service::{AnsweringService, ResearchError};
pub use types::{MAX_ITERATION, ResearchRequest, ResearchResponse};
