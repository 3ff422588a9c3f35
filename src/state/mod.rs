//! Application state module

mod app_state;
mod banner_state;
mod forms;

pub use app_state::*;
pub use banner_state::*;
pub use forms::*;
