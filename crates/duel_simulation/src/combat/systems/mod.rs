//! Combat systems (FixedUpdate)

pub mod damage;
pub mod setup;
pub mod state;


pub use damage::*;
pub use setup::*;
pub use state::*;
