//! Court view filtering
//!
//! Selects which shots are drawn on the court: only the selected period,
//! only results whose toggle is on, and optionally only one player.

mod criteria;
mod engine;

pub use criteria::CourtFilter;
pub use engine::FilterEngine;
