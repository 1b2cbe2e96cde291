use num_enum::IntoPrimitive;
use thiserror::Error;

/// Game error codes
/// Range 1000-1999: Game errors
/// Range 2000-2999: Validation errors
/// Range 3000-3999: Protocol errors
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[repr(u32)]
pub enum GameError {
    // Game Errors (1000-1999)
    #[error("Minimum bet is 10 tokens")]
    WagerTooSmall = 1001,

    // Validation Errors (2000-2999)
    #[error("Please enter a valid bet amount")]
    InvalidAmount = 2001,

    #[error("Unknown color, expected red, green or violet")]
    UnknownColor = 2002,

    // Protocol Errors (3000-3999)
    #[error("Response is missing a required field")]
    MissingField = 3001,
}

/// Failure carried by a decoded response envelope.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResponseError {
    /// The server answered `success: false`; the message is shown verbatim.
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Invalid(#[from] GameError),
}
