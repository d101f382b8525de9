//! AI systems (observe → react → decide)

pub mod decide;
pub mod observe;
pub mod reactions;

pub use decide::*;
pub use observe::*;
pub use reactions::*;
