pub mod event;
pub mod game;
pub mod market;

pub use event::*;
pub use game::*;
pub use market::*;
