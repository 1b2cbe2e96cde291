use chroma_api::prelude::*;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::{config::Config, error::ClientError, gateway::GameApi};

/// [`GameApi`] over JSON/HTTP.
///
/// Keeps the session cookie set by [`HttpGameApi::login`] for every later
/// request, like a browser tab would.
#[derive(Clone, Debug)]
pub struct HttpGameApi {
    client: Client,
    base_url: String,
}

impl HttpGameApi {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.server_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        debug!(path, "GET");
        let response = self.client.get(self.url(path)).send().await?;
        read(response).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&(impl Serialize + Sync)>,
    ) -> Result<T, ClientError> {
        debug!(path, "POST");
        let mut request = self.client.post(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        read(request.send().await?).await
    }

    /// Creates an account. Returns the server's confirmation message.
    pub async fn register(&self, username: &str, password: &str) -> Result<String, ClientError> {
        let credentials = Credentials { username, password };
        let response: MessageResponse = self.post(REGISTER_PATH, Some(&credentials)).await?;
        Ok(response.into_result()?)
    }

    /// Starts a session. Returns the logged in username.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ClientError> {
        let credentials = Credentials { username, password };
        let response: LoginResponse = self.post(LOGIN_PATH, Some(&credentials)).await?;
        Ok(response.into_result()?)
    }

    pub async fn logout(&self) -> Result<String, ClientError> {
        let response: MessageResponse = self.post(LOGOUT_PATH, None::<&()>).await?;
        Ok(response.into_result()?)
    }

    pub async fn session(&self) -> Result<SessionStatus, ClientError> {
        self.get(SESSION_PATH).await
    }
}

impl GameApi for HttpGameApi {
    async fn status(&self) -> Result<GameStatus, ClientError> {
        let response: StatusResponse = self.get(GAME_STATUS_PATH).await?;
        Ok(response.into_result()?)
    }

    async fn run_round(&self) -> Result<Color, ClientError> {
        let response: RunRoundResponse = self.post(RUN_ROUND_PATH, None::<&()>).await?;
        Ok(response.into_result()?)
    }

    async fn predict(&self, wager: Wager) -> Result<Placement, ClientError> {
        let response: PredictResponse = self.post(PREDICT_PATH, Some(&wager)).await?;
        Ok(response.into_result()?)
    }

    async fn balance(&self) -> Result<u64, ClientError> {
        let response: BalanceResponse = self.get(BALANCE_PATH).await?;
        Ok(response.into_result()?)
    }
}

/// Failure bodies (400, 402, 500) still carry the JSON envelope, so only 401
/// short-circuits.
async fn read<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    if response.status() == StatusCode::UNAUTHORIZED {
        return Err(ClientError::Unauthorized);
    }
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
