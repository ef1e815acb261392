//! Players, shots and the two team rosters

mod lifecycle;
mod model;

pub use lifecycle::MAX_PLAYER_NUMBER;
pub(crate) use model::lenient_optional_list;
pub use model::*;
