use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use url::Url;

use crate::{ApiError, DirectoryListing, FailureKind, StatusReport};

pub const DEFAULT_SERVER: &str = "http://localhost:8080/";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl ClientSettings {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
        }
    }

    /// Parses a server address, treating it as a directory so endpoint
    /// names resolve beneath it.
    pub fn parse(server: &str) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(server.trim())
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::new(FailureKind::InvalidUrl, server));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self::new(base_url))
    }
}

/// The engine's HTTP surface as seen by the console.
#[async_trait::async_trait]
pub trait ConsoleApi: Send + Sync {
    async fn browse(&self, path: &str) -> Result<DirectoryListing, ApiError>;

    async fn status(&self) -> Result<StatusReport, ApiError>;

    async fn upload(&self, file: &Path, destination: &str) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestConsoleApi {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestConsoleApi {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        // `/upload` answers with 303 See Other; that status is the success signal.
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn endpoint(&self, name: &str) -> Result<Url, ApiError> {
        self.settings
            .base_url
            .join(name)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

#[async_trait::async_trait]
impl ConsoleApi for ReqwestConsoleApi {
    async fn browse(&self, path: &str) -> Result<DirectoryListing, ApiError> {
        let mut url = self.endpoint("browse")?;
        url.query_pairs_mut().append_pair("path", path);

        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        let body = success_body(response).await?;
        decode(&body)
    }

    async fn status(&self) -> Result<StatusReport, ApiError> {
        let url = self.endpoint("status")?;
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        let body = success_body(response).await?;
        decode(&body)
    }

    async fn upload(&self, file: &Path, destination: &str) -> Result<(), ApiError> {
        let url = self.endpoint("upload")?;
        let bytes = tokio::fs::read(file)
            .await
            .map_err(|err| ApiError::new(FailureKind::Io, format!("{}: {err}", file.display())))?;
        let file_name = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.torrent".to_string());

        let form = Form::new()
            .part("torrent", Part::bytes(bytes).file_name(file_name))
            .text("destination", destination.to_string());

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status.is_success() || status.is_redirection() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::new(
            FailureKind::HttpStatus(status.as_u16()),
            body.trim(),
        ))
    }
}

/// Reads the body, turning a non-success status into an error carrying it.
async fn success_body(response: reqwest::Response) -> Result<String, ApiError> {
    let status = response.status();
    let body = response.text().await.map_err(map_reqwest_error)?;
    if !status.is_success() {
        return Err(ApiError::new(
            FailureKind::HttpStatus(status.as_u16()),
            body.trim(),
        ));
    }
    Ok(body)
}

fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() || err.is_body() {
        return ApiError::new(FailureKind::Decode, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
