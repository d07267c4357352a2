//! Cuckatoo Core - the solver/verifier core for Cuckatoo-cycle proof-of-work.
//!
//! Components, leaves first: a keyed PRF ([`siphash`]), the endpoint
//! function built on it ([`endpoint`]), a packed bitset with atomic
//! word-OR ([`bitset`]), two interchangeable trimming frontends
//! ([`lean_trim`], [`mean_trim`]), cycle recovery over the trimmed
//! residual ([`recovery`]), an independent verifier ([`verifier`]), and a
//! driver wiring them into one state machine ([`driver`]).

pub mod bitset;
pub mod driver;
pub mod endpoint;
pub mod error;
pub mod lean_trim;
pub mod mean_trim;
pub mod recovery;
pub mod siphash;
pub mod timing;
pub mod types;
pub mod verifier;

pub use driver::{Outcome, SolverDriver};
pub use error::{CuckatooError, Result};
pub use types::{Key, Params, SipVariant, SolveOutcome, TrimMode};
pub use verifier::VerifyError;
