//! Public types for the Abacus API.

mod calculate;
mod operation;

pub use calculate::{CalculateRequest, CalculateResponse, DIVISION_BY_ZERO_MESSAGE};
pub use operation::Operation;
