//! Leadboard dashboard session
//!
//! Loads leads from the lead webhook into a [`Dashboard`], keeps the list
//! filters and the lead form state, and turns user intents into store
//! mutations. Rendering is left to the embedding UI, which reads
//! [`Dashboard::snapshot`].

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod error;
pub mod source;
pub mod state;
pub mod wire;

pub use error::{SourceError, SourceResult};
pub use source::{HttpLeadSource, LeadSource, StaticLeadSource};
pub use state::{Dashboard, DashboardView, FormView, LoadOutcome, Notice, SaveOutcome};
pub use wire::RemoteLead;
