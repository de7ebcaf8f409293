//! Command handlers -- one module per command

pub mod run;
pub mod search;
pub mod tally;
