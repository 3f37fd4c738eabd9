use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, Response};
use shared::protocol::{MoveRequest, MoveResponse, MOVE_PATH, RESET_PATH};
use tracing::debug;
use url::Url;

use crate::{config::Settings, error::ClientError};

/// The remote service that owns the rules of the game.
#[async_trait]
pub trait ChessBackend: Send + Sync {
    async fn reset(&self) -> Result<(), ClientError>;
    async fn submit_move(&self, request: &MoveRequest) -> Result<MoveResponse, ClientError>;
}

pub struct HttpChessBackend {
    http: Client,
    reset_url: Url,
    move_url: Url,
}

impl HttpChessBackend {
    /// `base_url` must end with `/`; endpoints are joined onto it.
    pub fn new(base_url: &Url, timeout: Option<Duration>) -> Result<Self, ClientError> {
        // The backend keys the game to the session cookie.
        let mut builder = Client::builder().cookie_store(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            reset_url: base_url.join(RESET_PATH)?,
            move_url: base_url.join(MOVE_PATH)?,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ClientError> {
        Self::new(&settings.base_url()?, settings.request_timeout())
    }

    pub fn move_url(&self) -> &Url {
        &self.move_url
    }
}

async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status { status, body })
}

#[async_trait]
impl ChessBackend for HttpChessBackend {
    async fn reset(&self) -> Result<(), ClientError> {
        debug!(url = %self.reset_url, "reset: posting");
        let response = self
            .http
            .post(self.reset_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn submit_move(&self, request: &MoveRequest) -> Result<MoveResponse, ClientError> {
        debug!(
            url = %self.move_url,
            from = %request.from,
            to = %request.to,
            turn = request.current_turn.wire_name(),
            "move: posting"
        );
        let response = self
            .http
            .post(self.move_url.clone())
            .json(request)
            .send()
            .await?;
        let body = ensure_success(response).await?.text().await?;
        debug!(body = %body, "move: backend responded");
        serde_json::from_str(&body).map_err(|err| ClientError::Decode(err.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
