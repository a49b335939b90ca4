#![allow(clippy::new_without_default)] // Default not always appropriate for stateful types

// Module declarations
pub mod clients;
pub mod config;
pub mod pipeline;
pub mod server;
pub mod shutdown;

pub use clients::{ChatClient, ClientError, SearchClient, SearchRecord};
pub use pipeline::{InvestigationOutput, PartialFailure, PartialOutput, StartupPipeline};
