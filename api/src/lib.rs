//! Wire types and constants shared by the color prediction game clients.

pub mod bindings;
pub mod consts;
pub mod error;
pub mod state;
pub mod wire;

pub mod prelude {
    pub use crate::consts::*;
    pub use crate::error::*;
    pub use crate::state::*;
    pub use crate::wire::*;
}
