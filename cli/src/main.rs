mod input;
mod terminal;

use std::sync::Arc;

use anyhow::{bail, Result};
use chroma::{Config, Coordinator, GameApi, HttpGameApi, SettlePolicy};
use chroma_api::prelude::*;
use clap::{Parser, Subcommand, ValueEnum};
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use crate::{input::AmountField, terminal::Terminal};

/// Terminal client for the color prediction game.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Game server base URL. Overrides CHROMA_SERVER_URL.
    #[arg(long, global = true)]
    server: Option<String>,

    #[arg(long, short, global = true, env = "CHROMA_USERNAME")]
    username: Option<String>,

    #[arg(long, short, global = true, env = "CHROMA_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// What to do after a round settles. Overrides CHROMA_SETTLE_POLICY.
    #[arg(long, value_enum, global = true)]
    settle_policy: Option<Policy>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Live round view; wagers are read from stdin.
    Play,
    /// Print the open round and recent results.
    Status,
    /// Print the wallet balance.
    Balance,
    /// Place one wager.
    Bet { color: Color, amount: String },
    /// Settle the open round now.
    Settle,
    Register,
    Login,
    Logout,
    /// Print the logged in user.
    Whoami,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Policy {
    Fixed,
    UntilAdvanced,
}

impl Policy {
    /// Keeps the configured attempts and interval when already polling.
    fn apply(self, current: SettlePolicy) -> SettlePolicy {
        match (self, current) {
            (Policy::Fixed, _) => SettlePolicy::Fixed,
            (Policy::UntilAdvanced, SettlePolicy::UntilAdvanced { .. }) => current,
            (Policy::UntilAdvanced, SettlePolicy::Fixed) => SettlePolicy::default(),
        }
    }
}

impl Args {
    fn credentials(&self) -> Result<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Ok((username.as_str(), password.as_str())),
            _ => bail!("--username and --password are required"),
        }
    }

    fn config(&self) -> Result<Config> {
        Ok(self.override_config(Config::load()?))
    }

    /// Command line flags win over the environment.
    fn override_config(&self, mut config: Config) -> Config {
        if let Some(server) = &self.server {
            config = config.with_server_url(server.clone());
        }
        if let Some(policy) = self.settle_policy {
            let policy = policy.apply(config.settle_policy);
            config = config.with_settle_policy(policy);
        }
        config
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chroma=info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Logs in when credentials were given. The session cookie only lives as long
/// as this process.
async fn sign_in(api: &HttpGameApi, args: &Args) -> Result<()> {
    if let Ok((username, password)) = args.credentials() {
        let username = api.login(username, password).await?;
        info!(%username, "logged in");
    }
    Ok(())
}

async fn balance_line(api: &impl GameApi) -> Result<String> {
    Ok(format!("{} Akshu Tokens", api.balance().await?))
}

async fn play(api: HttpGameApi, config: &Config) -> Result<()> {
    let field = AmountField::default();
    let mut terminal = Terminal::stdout(field.clone());
    let (tx, rx) = mpsc::channel(16);

    println!("{}", input::help());
    input::spawn_reader(field, tx);

    let result = Coordinator::new(Arc::new(api), &mut terminal, config)
        .run(rx)
        .await;
    terminal.finish()?;
    Ok(result?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let config = args.config()?;
    let api = HttpGameApi::new(&config)?;
    debug!(server = api.base_url(), "game server");

    match &args.command {
        Cmd::Register => {
            let (username, password) = args.credentials()?;
            println!("{}", api.register(username, password).await?);
        }
        Cmd::Login => {
            let (username, password) = args.credentials()?;
            println!("Logged in as {}", api.login(username, password).await?);
        }
        Cmd::Logout => {
            sign_in(&api, &args).await?;
            println!("{}", api.logout().await?);
        }
        Cmd::Whoami => {
            sign_in(&api, &args).await?;
            let session = api.session().await?;
            match session.username.filter(|_| session.logged_in) {
                Some(username) => println!("{username}"),
                None => println!("Not logged in."),
            }
        }
        Cmd::Balance => {
            sign_in(&api, &args).await?;
            println!("{}", balance_line(&api).await?);
        }
        Cmd::Status => {
            sign_in(&api, &args).await?;
            let mut terminal = Terminal::stdout(AmountField::default());
            Coordinator::new(Arc::new(api), &mut terminal, &config)
                .refresh_status()
                .await?;
            terminal.finish()?;
        }
        Cmd::Bet { color, amount } => {
            sign_in(&api, &args).await?;
            let mut terminal = Terminal::stdout(AmountField::default());
            Coordinator::new(Arc::new(api), &mut terminal, &config)
                .place_bet(*color, amount)
                .await?;
            terminal.finish()?;
        }
        Cmd::Settle => {
            sign_in(&api, &args).await?;
            let mut terminal = Terminal::stdout(AmountField::default());
            let mut coordinator = Coordinator::new(Arc::new(api), &mut terminal, &config);
            coordinator.refresh_status().await?;
            coordinator.settle().await?;
            drop(coordinator);
            terminal.finish()?;
        }
        Cmd::Play => {
            sign_in(&api, &args).await?;
            play(api, &config).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chroma::ClientError;

    use super::*;

    struct FixedBalance(u64);

    impl GameApi for FixedBalance {
        async fn status(&self) -> Result<GameStatus, ClientError> {
            Err(ClientError::Unauthorized)
        }

        async fn run_round(&self) -> Result<Color, ClientError> {
            Err(ClientError::Unauthorized)
        }

        async fn predict(&self, _wager: Wager) -> Result<Placement, ClientError> {
            Err(ClientError::Unauthorized)
        }

        async fn balance(&self) -> Result<u64, ClientError> {
            Ok(self.0)
        }
    }

    #[tokio::test]
    async fn test_balance_line() {
        assert_eq!(balance_line(&FixedBalance(980)).await.unwrap(), "980 Akshu Tokens");
    }

    #[test]
    fn test_flags_override_config() {
        let env = Config::default().with_settle_policy(SettlePolicy::until_advanced(7, Duration::from_secs(2)));

        let args = Args::try_parse_from([
            "chroma",
            "--server",
            "http://game.test:8080",
            "--settle-policy",
            "fixed",
            "status",
        ])
        .unwrap();
        let config = args.override_config(env.clone());
        assert_eq!(config.server_url, "http://game.test:8080");
        assert_eq!(config.settle_policy, SettlePolicy::Fixed);
        assert_eq!(config.tick, env.tick);

        let args = Args::try_parse_from(["chroma", "status"]).unwrap();
        assert_eq!(args.override_config(env.clone()), env);
    }

    #[test]
    fn test_parse_bet() {
        let args = Args::try_parse_from(["chroma", "-u", "akshu", "-p", "pw", "bet", "v", "20"]).unwrap();
        match &args.command {
            Cmd::Bet { color, amount } => {
                assert_eq!(*color, Color::Violet);
                assert_eq!(amount, "20");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(args.credentials().unwrap(), ("akshu", "pw"));

        assert!(Args::try_parse_from(["chroma", "bet", "blue", "20"]).is_err());
    }

    #[test]
    fn test_settle_policy_flag() {
        let args = Args::try_parse_from(["chroma", "play", "--settle-policy", "fixed"]).unwrap();
        assert!(matches!(args.settle_policy, Some(Policy::Fixed)));

        let polling = SettlePolicy::until_advanced(9, Duration::from_millis(250));
        assert_eq!(Policy::Fixed.apply(polling), SettlePolicy::Fixed);
        assert_eq!(Policy::UntilAdvanced.apply(polling), polling);
        assert_eq!(
            Policy::UntilAdvanced.apply(SettlePolicy::Fixed),
            SettlePolicy::default()
        );
    }
}
