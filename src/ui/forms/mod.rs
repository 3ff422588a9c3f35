//! Form rendering module
//!
//! - `field_renderer`: single field rendering
//! - `invite_form`: the invite screen

mod field_renderer;
mod invite_form;

pub use invite_form::draw as draw_invite_form;
