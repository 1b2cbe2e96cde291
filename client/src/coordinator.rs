//! Round timer and settlement coordinator.
//!
//! One coordinator drives one view: it polls the round status, runs the
//! countdown, triggers settlement when the countdown expires and submits
//! wagers. State transitions live here; all drawing goes through the
//! [`Renderer`].
//!
//! ```text
//! status poll ──▶ countdown ──▶ settlement ──▶ grace delay ──┐
//!      ▲                                                     │
//!      └─────────────────────────────────────────────────────┘
//! ```

use std::{future, sync::Arc, time::Duration};

use chroma_api::prelude::*;
use tokio::{
    sync::mpsc,
    task::{JoinError, JoinHandle},
    time::sleep,
};
use tracing::{debug, info, warn};

use crate::{
    config::{Config, SettlePolicy},
    countdown::{format_clock, Tick},
    error::ClientError,
    gateway::GameApi,
    render::{badges, Feedback, Outcome, Renderer, TimerDisplay, Update},
    ticker::Ticker,
};

/// Input from the view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Raw amount-field content; validated before anything is sent.
    PlaceBet { prediction: Color, amount: String },
    /// Poll status now, restarting the countdown from server time.
    Refresh,
}

type BetResult = Result<Result<Placement, ClientError>, JoinError>;

struct PendingBet {
    wager: Wager,
    handle: JoinHandle<Result<Placement, ClientError>>,
}

pub struct Coordinator<A: GameApi, R: Renderer> {
    api: Arc<A>,
    renderer: R,
    ticker: Ticker,
    settle_grace: Duration,
    settle_policy: SettlePolicy,
    round: Option<Round>,
    balance: Option<u64>,
    pending_bet: Option<PendingBet>,
}

impl<A: GameApi, R: Renderer> Coordinator<A, R> {
    pub fn new(api: Arc<A>, renderer: R, config: &Config) -> Self {
        Self {
            api,
            renderer,
            ticker: Ticker::new(config.tick),
            settle_grace: config.settle_grace,
            settle_policy: config.settle_policy,
            round: None,
            balance: None,
            pending_bet: None,
        }
    }

    pub fn round(&self) -> Option<Round> {
        self.round
    }

    pub fn balance(&self) -> Option<u64> {
        self.balance
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn is_counting_down(&self) -> bool {
        self.ticker.is_active()
    }

    /// False while a wager is in flight.
    pub fn is_betting_enabled(&self) -> bool {
        self.pending_bet.is_none()
    }

    /// Loads balance and status, then serves ticks and commands until the
    /// command channel closes.
    ///
    /// Only an authorization failure ends the loop early.
    pub async fn run(&mut self, mut commands: mpsc::Receiver<Command>) -> Result<(), ClientError> {
        self.refresh_balance().await?;
        self.refresh_status().await?;

        loop {
            tokio::select! {
                tick = self.ticker.tick() => self.on_tick(tick).await?,
                (wager, joined) = bet_finished(&mut self.pending_bet) => {
                    self.pending_bet = None;
                    self.finish_bet(wager, joined)?;
                }
                command = commands.recv() => match command {
                    Some(command) => self.handle(command).await?,
                    None => break,
                },
            }
        }

        debug!("command channel closed");
        self.ticker.stop();
        self.await_pending_bet().await
    }

    async fn handle(&mut self, command: Command) -> Result<(), ClientError> {
        match command {
            Command::PlaceBet { prediction, amount } => {
                self.submit_bet(prediction, &amount);
                Ok(())
            }
            Command::Refresh => self.refresh_status().await,
        }
    }

    async fn on_tick(&mut self, tick: Tick) -> Result<(), ClientError> {
        match tick {
            Tick::Remaining(seconds) => {
                self.renderer
                    .render(Update::Timer(TimerDisplay::Clock(format_clock(seconds))));
                Ok(())
            }
            Tick::Expired => self.settle().await,
        }
    }

    /// Polls `/api/game/status` and restarts the countdown from server time.
    pub async fn refresh_status(&mut self) -> Result<(), ClientError> {
        let result = self.api.status().await;
        self.apply_status(result)
    }

    fn apply_status(&mut self, result: Result<GameStatus, ClientError>) -> Result<(), ClientError> {
        let status = match result {
            Ok(status) => status,
            Err(ClientError::Unauthorized) => return self.sign_out(),
            Err(err) => {
                warn!(error = %err, "status poll failed");
                self.ticker.stop();
                self.renderer.render(Update::Timer(TimerDisplay::Unavailable));
                return Ok(());
            }
        };

        let round = Round::from_status(&status);
        info!(
            round_id = round.id,
            remaining = round.time_remaining,
            "round status"
        );

        self.renderer.render(Update::Round(round.id));
        self.renderer
            .render(Update::History(badges(&status.past_results)));
        self.renderer.render(Update::Timer(TimerDisplay::Clock(format_clock(
            round.time_remaining,
        ))));

        self.round = Some(round);
        self.ticker.start(round.time_remaining);
        Ok(())
    }

    /// Polls `/api/wallet/balance`. Failures other than 401 keep the last
    /// known balance on screen.
    pub async fn refresh_balance(&mut self) -> Result<(), ClientError> {
        match self.api.balance().await {
            Ok(balance) => {
                self.balance = Some(balance);
                self.renderer.render(Update::Balance(balance));
                Ok(())
            }
            Err(ClientError::Unauthorized) => self.sign_out(),
            Err(err) => {
                warn!(error = %err, "balance refresh failed");
                Ok(())
            }
        }
    }

    /// Forces settlement of the open round, waits out the grace delay and
    /// reloads balance and status.
    pub async fn settle(&mut self) -> Result<(), ClientError> {
        self.ticker.stop();
        self.renderer.render(Update::Timer(TimerDisplay::Processing));

        let settling = self.round.map(|round| round.id);
        match self.api.run_round().await {
            Ok(color) => {
                info!(round_id = ?settling, %color, "round settled");
                if let Some(round) = self.round.as_mut() {
                    round.winning_color = Some(color);
                }
                self.renderer.render(Update::Outcome(Outcome::Winner {
                    round_id: settling,
                    color,
                }));
            }
            Err(ClientError::Unauthorized) => return self.sign_out(),
            Err(err) => {
                warn!(round_id = ?settling, error = %err, "settlement failed");
                self.renderer.render(Update::Outcome(Outcome::Failed));
            }
        }

        sleep(self.settle_grace).await;
        self.refresh_balance().await?;

        match self.settle_policy {
            SettlePolicy::Fixed => self.refresh_status().await,
            SettlePolicy::UntilAdvanced { attempts, interval } => {
                self.poll_until_advanced(self.round, attempts, interval).await
            }
        }
    }

    async fn poll_until_advanced(
        &mut self,
        settled: Option<Round>,
        attempts: u32,
        interval: Duration,
    ) -> Result<(), ClientError> {
        let settling = settled.map(|round| round.id);
        let attempts = attempts.max(1);
        let mut attempt = 1;

        loop {
            let result = self.api.status().await;
            let advanced = match (&result, settled) {
                (Ok(status), Some(round)) => round.is_superseded_by(status),
                (Ok(_), None) => true,
                (Err(err), _) => err.is_unauthorized(),
            };

            if advanced || attempt >= attempts {
                if !advanced {
                    warn!(round_id = ?settling, attempts, "round did not advance");
                }
                return self.apply_status(result);
            }

            debug!(round_id = ?settling, attempt, "round not advanced yet");
            attempt += 1;
            sleep(interval).await;
        }
    }

    /// Validates and sends a wager in the background.
    ///
    /// Invalid input is refused without a request. While a wager is in
    /// flight betting is disabled and further wagers are dropped.
    pub fn submit_bet(&mut self, prediction: Color, raw_amount: &str) {
        if self.pending_bet.is_some() {
            debug!(%prediction, "betting disabled while a wager is in flight");
            return;
        }

        let wager = match Wager::new(prediction, raw_amount) {
            Ok(wager) => wager,
            Err(err) => {
                warn!(code = u32::from(err), %err, "wager refused");
                self.renderer.render(Update::Feedback(Feedback::Invalid(err)));
                return;
            }
        };

        info!(prediction = %wager.prediction, amount = wager.amount, "placing wager");
        self.renderer.render(Update::Betting(false));
        self.renderer.render(Update::Feedback(Feedback::Placing(wager)));

        let api = Arc::clone(&self.api);
        let handle = tokio::spawn(async move { api.predict(wager).await });
        self.pending_bet = Some(PendingBet { wager, handle });
    }

    /// Submits a wager and waits for the answer.
    pub async fn place_bet(&mut self, prediction: Color, raw_amount: &str) -> Result<(), ClientError> {
        self.submit_bet(prediction, raw_amount);
        self.await_pending_bet().await
    }

    async fn await_pending_bet(&mut self) -> Result<(), ClientError> {
        match self.pending_bet.take() {
            Some(PendingBet { wager, handle }) => {
                let joined = handle.await;
                self.finish_bet(wager, joined)
            }
            None => Ok(()),
        }
    }

    fn finish_bet(&mut self, wager: Wager, joined: BetResult) -> Result<(), ClientError> {
        self.renderer.render(Update::Betting(true));

        match joined {
            Ok(Ok(placement)) => {
                info!(new_balance = placement.new_balance, "wager placed");
                self.balance = Some(placement.new_balance);
                self.renderer.render(Update::Balance(placement.new_balance));
                self.renderer
                    .render(Update::AmountField(DEFAULT_WAGER.to_string()));
                self.renderer.render(Update::Feedback(Feedback::Placed {
                    wager,
                    new_balance: placement.new_balance,
                }));
            }
            Ok(Err(ClientError::Unauthorized)) => return self.sign_out(),
            Ok(Err(ClientError::Rejected(message))) => {
                info!(%message, "wager rejected");
                self.renderer
                    .render(Update::Feedback(Feedback::Rejected(message)));
            }
            Ok(Err(err)) => {
                warn!(error = %err, "wager failed");
                self.renderer.render(Update::Feedback(Feedback::Failed));
            }
            Err(err) => {
                warn!(error = %err, "wager task failed");
                self.renderer.render(Update::Feedback(Feedback::Failed));
            }
        }
        Ok(())
    }

    fn sign_out(&mut self) -> Result<(), ClientError> {
        warn!("session rejected, signing out");
        self.ticker.stop();
        self.renderer.render(Update::SignedOut);
        Err(ClientError::Unauthorized)
    }
}

async fn bet_finished(pending: &mut Option<PendingBet>) -> (Wager, BetResult) {
    match pending {
        Some(bet) => {
            let joined = (&mut bet.handle).await;
            (bet.wager, joined)
        }
        None => future::pending().await,
    }
}
