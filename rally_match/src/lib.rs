//! Match loop for the table rally
//!
//! Wraps the `rally_core` world in a session that runs the countdown,
//! turns frame outcomes into audio cues and debounced haptics, tracks the
//! score and decides the match.

pub mod feedback;
pub mod fsm;
pub mod session;


pub use feedback::*;
pub use fsm::*;
pub use session::*;
