mod color;
mod round;
mod wager;

pub use color::*;
pub use round::*;
pub use wager::*;
