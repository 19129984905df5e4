mod envelope;
mod state;
mod trajectory;
pub mod wire;

pub use crate::envelope::*;
pub use crate::state::*;
pub use crate::trajectory::*;
