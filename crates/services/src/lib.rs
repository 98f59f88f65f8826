#![forbid(unsafe_code)]

pub mod catalog;
pub mod challenge;
pub mod display;
pub mod error;
mod keys;
pub mod queue;
pub mod results;
pub mod sequence;

pub use memcard_core::Clock;

pub use error::{
    CatalogServiceError, ChallengeError, DisplayError, QueueError, ResultError, SequenceError,
};

pub use catalog::CatalogService;
pub use challenge::{ChallengeAnswer, ChallengeProgress, ChallengeRun, ChallengeService};
pub use display::{DisplayRun, DisplayService};
pub use queue::MediaQueueBuilder;
pub use results::ResultService;
pub use sequence::SequenceService;
