//! # curlsmith-core
//!
//! Core session logic for curlsmith:
//! - An explicit state machine for the analyze/select/generate flow,
//!   with transitions as pure functions over session events
//! - An order-preserving field selection set
//! - The `Converter` orchestrator that drives the two model calls and
//!   reduces every failure to an error string held in the session

pub mod converter;
pub mod error;
pub mod selection;
pub mod session;

pub use converter::Converter;
pub use error::{CoreError, CoreResult};
pub use selection::SelectionSet;
pub use session::{SessionEvent, SessionState, Status};
