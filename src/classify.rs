// This file is part of the ufold package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! Pure predicates and width calculations over codepoints.
//!
//! These mirror the classifier contracts used by the wrap engine: what counts as a line
//! terminator, whitespace, a control character, or hanging punctuation, and how wide a
//! codepoint (or an elastic tab) is at a given column.

use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};
use unicode_width::UnicodeWidthChar;

/// `true` for the codepoint this engine treats as the logical line terminator.
///
/// Line terminators other than LF (CR, CRLF, U+2028, U+2029, U+0085) are normalized to LF by
/// the slot buffer before they ever reach this predicate.
pub fn is_linefeed(cp: u32) -> bool {
    cp == u32::from(b'\n')
}

/// `true` for control characters the sanitizer must not pass through, other than LF and HT.
pub fn is_control(cp: u32, ascii_mode: bool) -> bool {
    if cp == u32::from(b'\n') || cp == u32::from(b'\t') {
        return false;
    }
    if ascii_mode {
        return cp <= 0x1F || cp == 0x7F;
    }
    match char::from_u32(cp) {
        Some(c) => c.general_category() == GeneralCategory::Control,
        None => true,
    }
}

/// `true` for whitespace that is a candidate soft-break point (space and tab; in full
/// Unicode mode, any `Zs` codepoint). LF is never whitespace here, it is its own category.
pub fn is_whitespace(cp: u32, ascii_mode: bool) -> bool {
    if is_linefeed(cp) {
        return false;
    }
    if cp == u32::from(b' ') || cp == u32::from(b'\t') {
        return true;
    }
    if ascii_mode {
        return false;
    }
    matches!(char::from_u32(cp), Some(c) if c.general_category() == GeneralCategory::SpaceSeparator)
}

/// The preset hanging-punctuation set: ASCII quote/bracket openers, the common curly quotes,
/// and any codepoint in general category `Pi` (initial punctuation) or `Ps` (open
/// punctuation).
pub fn is_hanging_punctuation(cp: u32) -> bool {
    matches!(
        cp,
        0x22 | 0x27 | 0x28 | 0x5B | 0x7B | 0x60 | 0x2018 | 0x2019 | 0x201C
    ) || matches!(
        char::from_u32(cp),
        Some(c) if matches!(
            c.general_category(),
            GeneralCategory::InitialPunctuation | GeneralCategory::OpenPunctuation
        )
    )
}

/// `true` if `cp` should hang at the start of a continuation line: membership in an
/// explicit punctuation set if one was configured, otherwise the preset.
pub fn is_punctuation(punctuation: Option<&[char]>, cp: u32) -> bool {
    match punctuation {
        Some(set) => char::from_u32(cp).is_some_and(|c| set.contains(&c)),
        None => is_hanging_punctuation(cp),
    }
}

/// Display width of an isolated codepoint: `0`, `1`, or `2`. `None` means the codepoint has
/// no meaningful width and must be rejected by the sanitizer (this engine has no use for
/// backspace-style negative-width codepoints).
pub fn charwidth(cp: u32, ascii_mode: bool) -> Option<usize> {
    if ascii_mode {
        return if (0x20..=0x7E).contains(&cp) {
            Some(1)
        } else {
            Some(0)
        };
    }
    let c = char::from_u32(cp)?;
    Some(c.width().unwrap_or(0))
}

/// Width of a horizontal tab at the given running column: elastic (`tab_width > 1`, rounds
/// up to the next stop) or fixed (`tab_width` itself).
pub fn tab_width_at(tab_width: usize, column: usize) -> usize {
    if tab_width > 1 {
        tab_width - (column % tab_width)
    } else {
        tab_width
    }
}
