use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use super::errors::{ApiClientError, SubmitError};
use super::models::{ApiResponse, SourceMetadata, VerificationJob, VerificationRequest};
use super::transport::{HttpTransport, Params, RawResponse, Transport};
use super::types::JobStatus;
use crate::{
    address::Address,
    config::Timeouts,
    errors::RequestFailure,
    network::{NetworkId, NetworkRegistry},
};

/// Talks to the Etherscan-family API of every network in its registry.
///
/// Submission is a one-shot call: network and API errors are returned
/// to the caller, never retried here.
pub struct ExplorerClient<T = HttpTransport> {
    registry: NetworkRegistry,
    transport: T,
    timeouts: Timeouts,
}

impl ExplorerClient<HttpTransport> {
    /// # Errors
    ///
    /// Fails if the HTTP client can't be built (e.g. no TLS backend).
    pub fn new(registry: NetworkRegistry, timeouts: Timeouts) -> Result<Self, ApiClientError> {
        let client = Client::builder()
            .user_agent(concat!("evm-verify/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiClientError::Client)?;

        Ok(Self::with_transport(
            registry,
            HttpTransport::new(client),
            timeouts,
        ))
    }
}

impl<T: Transport> ExplorerClient<T> {
    pub fn with_transport(registry: NetworkRegistry, transport: T, timeouts: Timeouts) -> Self {
        Self {
            registry,
            transport,
            timeouts,
        }
    }

    pub fn registry(&self) -> &NetworkRegistry {
        &self.registry
    }

    pub fn timeouts(&self) -> &Timeouts {
        &self.timeouts
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Submits `request` for verification and returns the job to poll.
    ///
    /// Network, credential, address and source are checked, in that
    /// order, before anything is sent.
    ///
    /// # Errors
    ///
    /// Validation and configuration errors without any request made;
    /// `Network` on timeout or connection failure; `Api` for non-2xx
    /// answers; `Rejected` when the explorer refuses the submission.
    pub async fn submit(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationJob, SubmitError> {
        let network = self.registry.get(request.network)?;
        let api_key = self.registry.credential(request.network)?;
        let address = Address::new(&request.address)?;
        if request.source.trim().is_empty() {
            return Err(SubmitError::EmptySource);
        }

        log::info!(
            "Submitting {} at {address} to {}",
            request.contract_name,
            network.name
        );
        let form = request.form(api_key, &address);
        let response = self
            .transport
            .post_form(&network.api_url, &form, self.timeouts.submit)
            .await?;
        let response = ensure_success(&network.api_url, response)?;
        log::debug!("Raw submission response: {}", response.body);

        let reply: ApiResponse<serde_json::Value> = serde_json::from_str(&response.body)?;
        if !reply.is_ok() {
            let message = rejection_reason(&reply);
            log::warn!("Submission rejected: {message}");
            return Err(SubmitError::Rejected { message });
        }

        match reply.result.as_str().map(str::trim) {
            Some(guid) if !guid.is_empty() => {
                log::info!("Submission accepted, guid {guid}");
                Ok(VerificationJob::new(guid, request.network).with_address(address))
            }
            _ => {
                log::warn!("Submission accepted without a job id: {}", reply.result);
                Err(SubmitError::MissingGuid(reply.result.to_string()))
            }
        }
    }

    /// Asks once for the status of `job`.
    ///
    /// # Errors
    ///
    /// Configuration errors, transport failures, non-2xx answers and
    /// undecodable bodies.
    pub async fn check_status(&self, job: &VerificationJob) -> Result<JobStatus, ApiClientError> {
        let query = vec![
            ("module", "contract".to_owned()),
            ("action", "checkverifystatus".to_owned()),
            ("guid", job.guid.clone()),
        ];
        let reply: ApiResponse<String> = self.get_envelope(job.network, query).await?;
        Ok(JobStatus::from_response(&reply))
    }

    /// Looks up the verified source at `address`; `None` when the
    /// explorer has no source for it.
    ///
    /// # Errors
    ///
    /// Invalid address, configuration, transport or API failures.
    pub async fn source_code(
        &self,
        network: NetworkId,
        address: &str,
    ) -> Result<Option<SourceMetadata>, ApiClientError> {
        let address = Address::new(address)?;
        let query = vec![
            ("module", "contract".to_owned()),
            ("action", "getsourcecode".to_owned()),
            ("address", address.to_string()),
        ];
        let reply: ApiResponse<serde_json::Value> = self.get_envelope(network, query).await?;
        if !reply.is_ok() {
            return Err(ApiClientError::Rejected(rejection_reason(&reply)));
        }

        let entries: Vec<SourceMetadata> = serde_json::from_value(reply.result)?;
        Ok(entries.into_iter().next().filter(SourceMetadata::is_verified))
    }

    /// # Errors
    ///
    /// Same as [`Self::source_code`].
    pub async fn is_verified(
        &self,
        network: NetworkId,
        address: &str,
    ) -> Result<bool, ApiClientError> {
        Ok(self.source_code(network, address).await?.is_some())
    }

    /// Compiler versions the explorer accepts for `network`.
    ///
    /// # Errors
    ///
    /// `CompilerListUnavailable` when the explorer answers with a non-OK
    /// status, plus the usual configuration and transport failures.
    pub async fn compiler_versions(&self, network: NetworkId) -> Result<Vec<String>, ApiClientError> {
        let query = vec![
            ("module", "contract".to_owned()),
            ("action", "solcversions".to_owned()),
        ];
        let reply: ApiResponse<serde_json::Value> = self.get_envelope(network, query).await?;
        if !reply.is_ok() {
            return Err(ApiClientError::CompilerListUnavailable(rejection_reason(
                &reply,
            )));
        }

        Ok(serde_json::from_value(reply.result)?)
    }

    /// Explorer page for a job's contract, or the explorer's home page
    /// when the address isn't known.
    ///
    /// # Errors
    ///
    /// `UnsupportedNetwork` if the registry lacks the job's network.
    pub fn explorer_url(&self, job: &VerificationJob) -> Result<Url, ApiClientError> {
        let network = self.registry.get(job.network)?;
        Ok(job.address.as_ref().map_or_else(
            || network.explorer_url.clone(),
            |address| network.address_url(address),
        ))
    }

    async fn get_envelope<R: DeserializeOwned>(
        &self,
        network: NetworkId,
        mut query: Params,
    ) -> Result<ApiResponse<R>, ApiClientError> {
        let config = self.registry.get(network)?;
        let api_key = self.registry.credential(network)?;
        query.push(("apikey", api_key.expose().to_owned()));

        let response = self
            .transport
            .get(&config.api_url, &query, self.timeouts.status)
            .await?;
        let response = ensure_success(&config.api_url, response)?;
        log::debug!("Raw API response: {}", response.body);

        serde_json::from_str(&response.body).map_err(|e| {
            log::error!("Failed to parse JSON response: {e}");
            ApiClientError::from(e)
        })
    }
}

fn ensure_success(url: &Url, response: RawResponse) -> Result<RawResponse, RequestFailure> {
    if response.status.is_success() {
        Ok(response)
    } else {
        Err(RequestFailure::new(
            url.clone(),
            response.status,
            response.body,
        ))
    }
}

/// The explorer's `message`, else the `result` text when the message is
/// the generic `NOTOK` or missing.
fn rejection_reason(reply: &ApiResponse<serde_json::Value>) -> String {
    if let Some(reason) = reply.reason() {
        return reason.to_owned();
    }

    match &reply.result {
        serde_json::Value::String(text) if !text.trim().is_empty() => text.trim().to_owned(),
        serde_json::Value::String(_) | serde_json::Value::Null => "no reason given".to_owned(),
        other => other.to_string(),
    }
}
