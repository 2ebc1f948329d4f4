//! Core library for the `weatherdoor` forecast page.
//!
//! This crate defines:
//! - The forecast API contract and an HTTP source for it
//! - The view-model builder (icons, advice, time periods, averages)
//! - maud templates and a renderer writing onto a [`Page`]
//! - The fetch orchestrator coordinating loading state, requests and failures
//! - Configuration handling
//!
//! It is used by `weatherdoor-cli`, but any other surface implementing [`Page`]
//! can drive it.

pub mod classify;
pub mod config;
pub mod error;
pub mod model;
pub mod orchestrator;
pub mod page;
pub mod render;
pub mod source;
pub mod templates;
pub mod view_model;

pub use config::Config;
pub use error::FetchError;
pub use model::{ApiEnvelope, ForecastRecord, ForecastSeries};
pub use orchestrator::{Clock, FetchOrchestrator, FetchOutcome, SystemClock};
pub use page::{DisplayState, HtmlPage, Page};
pub use source::{ForecastSource, HttpForecastSource};

pub use maud::Markup;
