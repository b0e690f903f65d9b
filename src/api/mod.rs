// Re-export the API module components
pub use self::{
    client::ExplorerClient,
    errors::{ApiClientError, SubmitError},
    models::{ApiResponse, SourceMetadata, VerificationJob, VerificationRequest},
    polling::poll_verification_status,
    transport::{HttpTransport, Params, RawResponse, Transport, TransportError},
    types::{JobStatus, VerificationOutcome},
};

// Module declarations
mod client;
mod errors;
mod models;
mod polling;
mod transport;
mod types;
