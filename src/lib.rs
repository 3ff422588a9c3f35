//! Invite TUI - a terminal screen for inviting friends and colleagues
//!
//! The screen is built on a small form model: fields are declared once,
//! addressed by typed paths, validated together and submitted as one
//! JSON tree.

pub mod app;
pub mod config;
pub mod environment;
pub mod invites;
pub mod messages;
pub mod platform;
pub mod state;
pub mod ui;
