//! Request and response bodies of the game and session endpoints.
//!
//! Every game response is an envelope with a `success` flag. On `false` the
//! server may attach a `message`, which clients surface verbatim. The
//! [`Envelope`] trait folds both cases into a `Result`.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, ResponseError};
use crate::state::{Color, GameStatus, PastResult};

const DEFAULT_FAILURE: &str = "Request failed.";

pub trait Envelope {
    type Output;

    fn into_result(self) -> Result<Self::Output, ResponseError>;
}

fn rejected(message: Option<String>) -> ResponseError {
    ResponseError::Rejected(message.unwrap_or_else(|| DEFAULT_FAILURE.to_string()))
}

/// `GET /api/game/status`
#[derive(Clone, Debug, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: Option<String>,
    pub current_round_id: Option<u64>,
    pub time_remaining: Option<i64>,
    pub past_results: Option<Vec<PastResult>>,
}

impl Envelope for StatusResponse {
    type Output = GameStatus;

    fn into_result(self) -> Result<GameStatus, ResponseError> {
        if !self.success {
            return Err(rejected(self.message));
        }
        Ok(GameStatus {
            current_round_id: self.current_round_id.ok_or(GameError::MissingField)?,
            time_remaining: self.time_remaining.ok_or(GameError::MissingField)?,
            past_results: self.past_results.unwrap_or_default(),
        })
    }
}

/// `POST /api/game/run_round`
#[derive(Clone, Debug, Deserialize)]
pub struct RunRoundResponse {
    pub success: bool,
    pub message: Option<String>,
    pub winning_color: Option<Color>,
}

impl Envelope for RunRoundResponse {
    type Output = Color;

    fn into_result(self) -> Result<Color, ResponseError> {
        if !self.success {
            return Err(rejected(self.message));
        }
        Ok(self.winning_color.ok_or(GameError::MissingField)?)
    }
}

/// Accepted wager as reported by `POST /api/game/predict`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub new_balance: u64,
    pub message: Option<String>,
}

/// `POST /api/game/predict`
#[derive(Clone, Debug, Deserialize)]
pub struct PredictResponse {
    pub success: bool,
    pub message: Option<String>,
    pub new_balance: Option<u64>,
}

impl Envelope for PredictResponse {
    type Output = Placement;

    fn into_result(self) -> Result<Placement, ResponseError> {
        if !self.success {
            return Err(rejected(self.message));
        }
        Ok(Placement {
            new_balance: self.new_balance.ok_or(GameError::MissingField)?,
            message: self.message,
        })
    }
}

/// `GET /api/wallet/balance`
#[derive(Clone, Debug, Deserialize)]
pub struct BalanceResponse {
    pub success: bool,
    pub message: Option<String>,
    pub balance: Option<u64>,
}

impl Envelope for BalanceResponse {
    type Output = u64;

    fn into_result(self) -> Result<u64, ResponseError> {
        if !self.success {
            return Err(rejected(self.message));
        }
        Ok(self.balance.ok_or(GameError::MissingField)?)
    }
}

/// `POST /api/register` and `POST /api/logout`
#[derive(Clone, Debug, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: Option<String>,
}

impl Envelope for MessageResponse {
    type Output = String;

    fn into_result(self) -> Result<String, ResponseError> {
        if !self.success {
            return Err(rejected(self.message));
        }
        Ok(self.message.unwrap_or_default())
    }
}

/// `POST /api/login`
#[derive(Clone, Debug, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: Option<String>,
    pub username: Option<String>,
}

impl Envelope for LoginResponse {
    type Output = String;

    /// Yields the username the server logged in.
    fn into_result(self) -> Result<String, ResponseError> {
        if !self.success {
            return Err(rejected(self.message));
        }
        Ok(self.username.ok_or(GameError::MissingField)?)
    }
}

/// `GET /api/status`. Not an envelope: it always succeeds.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SessionStatus {
    #[serde(rename = "isLoggedIn")]
    pub logged_in: bool,
    pub username: Option<String>,
}

/// Body of `POST /api/register` and `POST /api/login`.
#[derive(Clone, Debug, Serialize)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_success() {
        let body = r#"{"success":true,"current_round_id":42,"time_remaining":3,
            "past_results":[{"round_id":41,"color":"red"},{"round_id":40,"color":"violet"}]}"#;
        let status = serde_json::from_str::<StatusResponse>(body)
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(status.current_round_id, 42);
        assert_eq!(status.time_remaining, 3);
        assert_eq!(
            status.past_results,
            vec![
                PastResult { round_id: 41, color: Color::Red },
                PastResult { round_id: 40, color: Color::Violet },
            ]
        );
    }

    #[test]
    fn test_status_failure_and_missing_fields() {
        let rejected = serde_json::from_str::<StatusResponse>(
            r#"{"success":false,"message":"Unauthorized access. Please log in."}"#,
        )
        .unwrap()
        .into_result();
        assert_eq!(
            rejected,
            Err(ResponseError::Rejected("Unauthorized access. Please log in.".to_string()))
        );

        let missing = serde_json::from_str::<StatusResponse>(r#"{"success":true}"#)
            .unwrap()
            .into_result();
        assert_eq!(missing, Err(ResponseError::Invalid(GameError::MissingField)));
    }

    #[test]
    fn test_predict_failure_without_message() {
        let result = serde_json::from_str::<PredictResponse>(r#"{"success":false}"#)
            .unwrap()
            .into_result();
        assert_eq!(result, Err(ResponseError::Rejected(DEFAULT_FAILURE.to_string())));
    }

    #[test]
    fn test_run_round() {
        let color = serde_json::from_str::<RunRoundResponse>(
            r#"{"success":true,"message":"Game Round 5 completed.","winning_color":"green"}"#,
        )
        .unwrap()
        .into_result()
        .unwrap();
        assert_eq!(color, Color::Green);
    }

    #[test]
    fn test_session_status() {
        let session: SessionStatus =
            serde_json::from_str(r#"{"isLoggedIn":true,"username":"akshu"}"#).unwrap();
        assert!(session.logged_in);
        assert_eq!(session.username.as_deref(), Some("akshu"));
    }
}
