pub mod html;
pub mod terminal;
pub mod web;

pub use terminal::{render_error, TerminalRenderer};
