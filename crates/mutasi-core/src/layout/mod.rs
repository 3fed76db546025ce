//! Geometric reconstruction of the statement table.
//!
//! Words are grouped into rows ([`rows`]), rows are classified against the
//! table region ([`region`]), and table rows are split into columns
//! ([`columns`], [`zones`]).

pub mod columns;
pub mod region;
pub mod rows;
pub mod zones;
