use std::future::Future;

use chroma_api::prelude::*;

use crate::error::ClientError;

/// The four game endpoints the coordinator depends on.
///
/// Implementations report `success: false` as [`ClientError::Rejected`] and
/// HTTP 401 as [`ClientError::Unauthorized`].
pub trait GameApi: Send + Sync + 'static {
    /// `GET /api/game/status`
    fn status(&self) -> impl Future<Output = Result<GameStatus, ClientError>> + Send;

    /// `POST /api/game/run_round`
    fn run_round(&self) -> impl Future<Output = Result<Color, ClientError>> + Send;

    /// `POST /api/game/predict`
    fn predict(&self, wager: Wager) -> impl Future<Output = Result<Placement, ClientError>> + Send;

    /// `GET /api/wallet/balance`
    fn balance(&self) -> impl Future<Output = Result<u64, ClientError>> + Send;
}
