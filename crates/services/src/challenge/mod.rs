mod progress;
mod run;
mod service;

// Public API of the challenge subsystem.
pub use crate::error::ChallengeError;
pub use progress::ChallengeProgress;
pub use run::ChallengeRun;
pub use service::{ChallengeAnswer, ChallengeService};
