// This file is part of the ufold package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use std::fmt::Display;
use std::io;
use std::path::PathBuf;

use uucore::display::Quotable;
use uucore::error::UError;

/// Failures internal to the wrap engine. Any of these poisons the engine: only [`Error::Stopped`]
/// can be returned again afterwards, until the caller drops it.
#[derive(Debug)]
pub enum Error {
    /// The writer returned an error.
    Io(io::Error),
    /// A width or buffer-size computation would have wrapped.
    Overflow,
    /// `feed` or `flush` was called after the engine was stopped.
    Stopped,
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Overflow | Error::Stopped => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(e) => write!(f, "write failed: {e}"),
            Error::Overflow => write!(f, "line width too large: arithmetic overflow"),
            Error::Stopped => write!(f, "engine already stopped"),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

/// CLI-facing errors: an engine failure, or a per-file problem encountered while reading
/// input. Implements [`UError`] the way `src/uu/chroot/src/error.rs` does for its own error
/// type, rather than panicking or using `crash!`.
#[derive(Debug)]
pub enum CliError {
    Engine(Error),
    CannotOpen(PathBuf, io::Error),
    CannotRead(PathBuf, io::Error),
    IsDirectory(PathBuf),
}

impl std::error::Error for CliError {}

impl UError for CliError {
    fn code(&self) -> i32 {
        1
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Engine(e) => write!(f, "{e}"),
            CliError::CannotOpen(path, e) => {
                write!(f, "cannot open {}: {e}", path.quote())
            }
            CliError::CannotRead(path, e) => {
                write!(f, "error reading {}: {e}", path.quote())
            }
            CliError::IsDirectory(path) => {
                write!(f, "{}: Is a directory", path.quote())
            }
        }
    }
}

impl From<Error> for CliError {
    fn from(e: Error) -> Self {
        CliError::Engine(e)
    }
}
