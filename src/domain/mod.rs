//! Domain modules (vertical slices): types, wire types, conversions, state.

pub mod fees;
pub mod payment;
pub mod quote;
