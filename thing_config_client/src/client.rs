use crate::{settings::Settings, SensorConfig};
use serde::{Deserialize, Serialize};

/// The default client useragent for thing config requests
static USERAGENT: &str = concat!("thing-config-client/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("error building http client")]
    Setup(#[source] reqwest::Error),
    #[error("error connecting to the thing config service")]
    Connect(#[source] reqwest::Error),
    #[error("connection rejected: {0}")]
    ConnectRejected(String),
    #[error("request error")]
    Request(#[source] reqwest::Error),
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("malformed response")]
    Malformed(#[source] reqwest::Error),
}

/// Client for the thing config cloud service.
///
/// Carries the connection settings and a reusable http client with bounded
/// connect and request timeouts. Opening a session with [`connect`] is
/// required before any call; all further calls go through the returned
/// [`Session`].
///
/// [`connect`]: ThingConfigClient::connect
#[derive(Clone, Debug)]
pub struct ThingConfigClient {
    http: reqwest::Client,
    settings: Settings,
}

impl ThingConfigClient {
    pub fn from_settings(settings: &Settings) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .gzip(true)
            .user_agent(USERAGENT)
            .connect_timeout(settings.connect_timeout())
            .timeout(settings.rpc_timeout())
            .build()
            .map_err(ClientError::Setup)?;
        Ok(Self {
            http,
            settings: settings.clone(),
        })
    }

    /// Open an authenticated session with the service.
    ///
    /// Presents whichever of username/password/token the settings carry and
    /// returns the session the service issued.
    pub async fn connect(&self) -> Result<Session, ClientError> {
        let url = format!("{}/v1/sessions", self.settings.url());
        let request = SessionRequest {
            username: self.settings.username.as_deref(),
            password: self.settings.password.as_deref(),
            token: self.settings.token.as_deref(),
        };
        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(ClientError::Connect)?;
        match response.status() {
            reqwest::StatusCode::OK | reqwest::StatusCode::CREATED => {
                let session: SessionResponse =
                    response.json().await.map_err(ClientError::Malformed)?;
                tracing::debug!(session = %session.id, "session opened");
                Ok(Session {
                    http: self.http.clone(),
                    base_url: self.settings.url(),
                    id: session.id,
                    token: session.token,
                })
            }
            other => Err(ClientError::ConnectRejected(
                rejection_detail(other, response).await,
            )),
        }
    }
}

/// An authenticated session with the thing config service.
///
/// [`close`] consumes the session, so it can be released at most once.
///
/// [`close`]: Session::close
#[derive(Debug)]
pub struct Session {
    http: reqwest::Client,
    base_url: String,
    id: String,
    token: String,
}

impl Session {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Replace the event config of the given sensors on a thing.
    ///
    /// Returns the raw response body; its shape is the service's concern and
    /// is passed through for display.
    pub async fn update_config(
        &mut self,
        thing_id: &str,
        configs: &[SensorConfig],
    ) -> Result<serde_json::Value, ClientError> {
        let url = format!("{}/v1/things/{}/config", self.base_url, thing_id);
        let response = self
            .http
            .put(&url)
            .bearer_auth(&self.token)
            .json(&configs)
            .send()
            .await
            .map_err(ClientError::Request)?;
        match response.status() {
            reqwest::StatusCode::OK => response.json().await.map_err(ClientError::Malformed),
            other => Err(ClientError::Rejected(rejection_detail(other, response).await)),
        }
    }

    /// Release the session on the service.
    pub async fn close(self) -> Result<(), ClientError> {
        let url = format!("{}/v1/sessions/{}", self.base_url, self.id);
        let response = self
            .http
            .delete(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(ClientError::Request)?;
        match response.status() {
            reqwest::StatusCode::OK | reqwest::StatusCode::NO_CONTENT => {
                tracing::debug!(session = %self.id, "session closed");
                Ok(())
            }
            other => Err(ClientError::Rejected(rejection_detail(other, response).await)),
        }
    }
}

async fn rejection_detail(status: reqwest::StatusCode, response: reqwest::Response) -> String {
    match response.text().await {
        Ok(body) if !body.is_empty() => format!("{status}: {body}"),
        _ => status.to_string(),
    }
}

#[derive(Debug, Serialize)]
struct SessionRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    id: String,
    token: String,
}
