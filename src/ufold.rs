// This file is part of the ufold package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! `ufold` wraps each paragraph of its input to fit a display width, the way `fold(1)` does,
//! but Unicode-aware: display width (not byte count) drives wrapping, combining marks and
//! wide characters are accounted for, and a handful of GNU-style extensions (hanging
//! punctuation, indent preservation, word-boundary breaking) are layered on top.
//!
//! The [`Engine`] is the library surface; [`cli::uumain`] drives it from the command line.

mod classify;
mod cli;
mod config;
mod engine;
mod error;
mod sanitize;
mod slot;
mod utf8;

pub use cli::{uu_app, uumain};
pub use config::Config;
pub use engine::Engine;
pub use error::{CliError, Error};
