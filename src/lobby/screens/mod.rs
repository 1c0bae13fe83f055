//! Screen implementations for the lobby state machine.

mod board;
mod menu;
mod victory;

pub use board::BoardScreen;
pub use menu::MenuScreen;
pub use victory::VictoryScreen;
