//! Progressive "typing" reveal of bot responses

pub mod scheduler;
pub mod state;

pub use scheduler::{RevealHandle, RevealOutcome, RevealScheduler, RevealSlot};
pub use state::RevealState;
