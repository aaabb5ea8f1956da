// This file is part of the ufold package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! Engine configuration.

/// Settings that govern how an [`crate::Engine`] wraps its input. All fields are public and
/// fixed for the lifetime of the engine; there is no way to reconfigure an engine in place.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum display width of a wrapped line. `0` disables wrapping: input is sanitized
    /// and terminator-normalized but otherwise passed through unchanged.
    pub max_width: usize,
    /// Maximum width of a horizontal tab. `> 1` makes tabs elastic (advance to the next
    /// stop); `0` or `1` makes every tab exactly that many columns wide.
    pub tab_width: usize,
    /// Re-emit each logical line's leading whitespace as the prefix of its continuation
    /// lines.
    pub keep_indentation: bool,
    /// Absorb leading punctuation into the continuation indent (as spaces) when
    /// `keep_indentation` is set.
    pub hang_punctuation: bool,
    /// Explicit set of codepoints treated as hanging punctuation. `None` uses the preset
    /// (see [`crate::classify::is_hanging_punctuation`]).
    pub punctuation: Option<Vec<char>>,
    /// Prefer breaking at whitespace over breaking mid-word.
    pub break_at_spaces: bool,
    /// Treat input as ASCII: count bytes as columns and replace any byte above `0x7F`.
    pub ascii_mode: bool,
    /// Release output at every line feed rather than only when the internal buffer fills.
    pub line_buffered: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_width: 78,
            tab_width: 8,
            keep_indentation: false,
            hang_punctuation: false,
            punctuation: None,
            break_at_spaces: true,
            ascii_mode: false,
            line_buffered: false,
        }
    }
}
