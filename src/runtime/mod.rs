//! Recall experiments: session driver and scoring.

pub mod report;
pub mod session;

pub use report::{RecallOutcome, RecallTally, SessionReport};
pub use session::{Session, SessionConfig};
