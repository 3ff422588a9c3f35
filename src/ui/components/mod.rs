//! Reusable UI components

mod button;
mod infobox;

pub use button::{button_width, render_button, ButtonKind, BUTTON_HEIGHT};
pub use infobox::render_success_infobox;
