//! Game session state

mod session;

pub use session::GameSession;
