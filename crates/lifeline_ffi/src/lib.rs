//! Flutter bridge surface for the Lifeline core.

pub mod api;
