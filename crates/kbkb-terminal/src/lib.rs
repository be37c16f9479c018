//! Terminal backend for the kbkb cluster board.
#![allow(clippy::uninlined_format_args)] // "variables can be used directly in format!"
#![allow(clippy::doc_markdown)] // "item in documentation missing backticks"
//!
//! Turns a [`kbkb_core::Grid`] into a block of ANSI-colored text and redraws
//! it in place on every refresh.
//!
//! # Example
//!
//! ```
//! use kbkb_core::Grid;
//! use kbkb_terminal::{render, CharSet, OverwritePrinter};
//!
//! let frame = render(&Grid::default(), &CharSet::narrow());
//! let mut printer = OverwritePrinter::new(Vec::new());
//! printer.print(&frame)?;
//! # Ok::<(), kbkb_terminal::TuiError>(())
//! ```

mod charset;
mod error;
mod printer;
mod render;

pub use charset::{default_color_codes, CharSet, CharsetPreset, NEUTRAL_COLOR_CODE};
pub use error::TuiError;
pub use printer::OverwritePrinter;
pub use render::render;
