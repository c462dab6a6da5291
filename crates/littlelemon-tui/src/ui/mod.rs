//! Terminal UI module using ratatui.
//!
//! - `render`: Frame layout, title/status bars and overlays
//! - `input`: Keyboard event handling per screen
//! - `styles`: Little Lemon colour palette and text styling
//! - `screens`: Onboarding, home and profile content

pub mod input;
pub mod render;
pub mod styles;
pub mod screens;
