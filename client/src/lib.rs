//! Client side of the color prediction game.
//!
//! # Round lifecycle
//! - The server owns rounds, wallets and settlement. This crate only holds a
//!   snapshot of the open round and a local countdown.
//! - [`Coordinator`] polls status, counts down once per second, asks the
//!   server to settle when the countdown hits zero and polls again.
//! - Wagers are validated locally (integer, at least 10 tokens) and sent once.
//!
//! # Consistency
//! The countdown is only as fresh as the last poll. Several clients may all
//! trigger settlement for the same round when their clocks expire together;
//! the server is expected to settle idempotently.
//!
//! # Rendering
//! Nothing in here draws. The coordinator emits [`render::Update`]s to a
//! [`Renderer`], which the terminal front end and the tests implement.

pub mod config;
pub mod coordinator;
pub mod countdown;
pub mod error;
pub mod gateway;
pub mod http;
pub mod render;
pub mod ticker;

pub use config::{Config, SettlePolicy};
pub use coordinator::{Command, Coordinator};
pub use error::ClientError;
pub use gateway::GameApi;
pub use http::HttpGameApi;
pub use render::{Renderer, Update};
