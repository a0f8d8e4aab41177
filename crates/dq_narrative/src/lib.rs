//! Narrative summaries of data quality KPIs.
//!
//! Sends the KPIs of a pipeline run to an external question-answering
//! service and returns its markdown answer. The service is optional: when it
//! is not configured, or when a call fails, no narrative is produced and the
//! pipeline outputs are unaffected.
//!
//! # Example
//!
//! ```rust
//! use dq_narrative::{NarrativeClient, NarrativeConfig};
//!
//! let client = NarrativeClient::from_config(NarrativeConfig::default()).unwrap();
//! assert!(!client.is_enabled());
//! ```

mod client;
mod error;

pub use client::*;
pub use error::*;
