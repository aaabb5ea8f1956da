// This file is part of the ufold package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! The wrap engine: a streaming state machine that folds text to a maximum display width.

use std::io::Write;

use crate::classify;
use crate::config::Config;
use crate::error::Error;
use crate::sanitize;
use crate::slot::SlotBuffer;
use crate::utf8;

/// Growth increment for the slot buffer; also the floor added to the line buffer's initial
/// capacity hint so a single `feed` call can always make progress before a flush is forced.
const SLOT_SIZE: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Start of a new logical line: indent/hanging-punctuation collection happens here.
    Line,
    /// Inside the body of a line; whitespace here is a soft-break candidate.
    Word,
    /// A wrapped line was just emitted; about to start a continuation.
    Wrap,
    /// The indent alone meets or exceeds the configured width: pass the rest of this
    /// logical line through unwrapped, until its terminating line feed.
    Full,
}

/// The streaming line-wrapping engine. Owns its output writer and every buffer it needs;
/// there are no borrowed references held across calls.
pub struct Engine<W: Write> {
    config: Config,
    writer: W,

    line: Vec<u8>,
    max_size: usize,
    max_capacity: usize,
    cursor: usize,
    cursor_offset: usize,
    cursor_at_word: bool,

    eow: usize,
    eow_ss: usize,
    eow_ww: usize,

    slots: SlotBuffer,
    ascii_crlf: bool,

    indent: Vec<u8>,
    indent_width: usize,
    indent_hanging: bool,

    state: State,
    stopped: bool,
}

impl<W: Write> Engine<W> {
    /// Construct a new engine. Fails only if `config.max_width` is so large that the
    /// internal buffer-sizing arithmetic would overflow `usize`.
    pub fn new(config: Config, writer: W) -> Result<Self, Error> {
        let max_size = if config.max_width == 0 {
            0
        } else {
            config
                .max_width
                .checked_mul(4)
                .ok_or(Error::Overflow)?
        };
        Ok(Engine {
            line: Vec::with_capacity(max_size + SLOT_SIZE + 1),
            max_size,
            max_capacity: max_size,
            cursor: 0,
            cursor_offset: 0,
            cursor_at_word: false,
            eow: 0,
            eow_ss: 0,
            eow_ww: 0,
            slots: SlotBuffer::new(),
            ascii_crlf: false,
            indent: Vec::new(),
            indent_width: 0,
            indent_hanging: false,
            state: State::Line,
            stopped: false,
            config,
            writer,
        })
    }

    /// Consume the engine, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Feed a chunk of input bytes.
    pub fn feed(&mut self, bytes: &[u8]) -> Result<(), Error> {
        if self.stopped {
            return Err(Error::Stopped);
        }
        let result = if self.config.ascii_mode {
            self.feed_ascii(bytes)
        } else {
            self.feed_utf8(bytes)
        };
        if result.is_err() {
            self.stopped = true;
        }
        result
    }

    /// Force emission of every completed wrapped line currently buffered. An incomplete
    /// final word is retained for the next `feed`.
    pub fn flush(&mut self) -> Result<(), Error> {
        if self.stopped {
            return Err(Error::Stopped);
        }
        if let Err(e) = self.flush_loop() {
            self.stopped = true;
            return Err(e);
        }
        Ok(())
    }

    /// Drain and terminate the engine. Idempotent: calling `stop` again is a no-op success.
    pub fn stop(&mut self) -> Result<(), Error> {
        if self.stopped {
            return Ok(());
        }
        self.stopped = true;

        if self.slots.used() > 0 {
            let mut residual = self.slots.as_slice().to_vec();
            sanitize::sanitize_utf8(&mut residual);
            self.append(&residual)?;
            let n = self.slots.used();
            self.slots.shift(n);
        }
        self.flush_loop()?;
        debug_assert!(self.line.is_empty());
        Ok(())
    }

    fn feed_utf8(&mut self, bytes: &[u8]) -> Result<(), Error> {
        for &b in bytes {
            let n = self.slots.push(b, self.config.line_buffered);
            if n > 0 {
                let mut ready = self.slots.as_slice()[..n].to_vec();
                sanitize::sanitize_utf8(&mut ready);
                self.append(&ready)?;
                self.slots.shift(n);
            }
        }
        Ok(())
    }

    fn feed_ascii(&mut self, bytes: &[u8]) -> Result<(), Error> {
        for &byte in bytes {
            let c = if byte == b'\r' {
                self.ascii_crlf = true;
                b'\n'
            } else {
                let combined = byte == b'\n' && self.ascii_crlf;
                self.ascii_crlf = false;
                if combined {
                    continue;
                }
                byte
            };
            self.append(&[sanitize::sanitize_ascii(c)])?;
        }
        Ok(())
    }

    /// Append already-normalized, already-sanitized bytes to the line buffer, flushing
    /// opportunistically once the soft size threshold is crossed.
    fn append(&mut self, bytes: &[u8]) -> Result<(), Error> {
        if self.config.max_width == 0 {
            if !bytes.is_empty() {
                self.writer.write_all(bytes)?;
            }
            return Ok(());
        }
        if bytes.is_empty() {
            return Ok(());
        }
        self.line.extend_from_slice(bytes);
        if self.line.len() > self.max_size {
            self.flush_loop()?;
        }
        Ok(())
    }

    fn write_indent(&mut self) -> Result<(), Error> {
        if !self.indent.is_empty() {
            self.writer.write_all(&self.indent)?;
        }
        Ok(())
    }

    fn indent_feed(&mut self, bytes: &[u8], width: usize) -> Result<(), Error> {
        self.indent_width = self
            .indent_width
            .checked_add(width)
            .ok_or(Error::Overflow)?;
        self.indent.extend_from_slice(bytes);
        Ok(())
    }

    fn indent_reset(&mut self) {
        self.indent.clear();
        self.indent_width = 0;
        self.indent_hanging = false;
    }

    fn eow_reset(&mut self) {
        self.eow = 0;
        self.eow_ss = 0;
        self.eow_ww = 0;
    }

    /// The core state machine. Scans `self.line` from `self.cursor` onward, writing
    /// completed (possibly wrapped) output through `self.writer`, and leaves whatever
    /// cannot yet be decided (an in-progress word, an indent not yet fully read) in
    /// `self.line` for the next call.
    fn flush_loop(&mut self) -> Result<(), Error> {
        if self.config.max_width == 0 {
            return Ok(());
        }

        let mut sol = 0usize;
        let mut i = self.cursor;
        let mut offset = self.cursor_offset;
        let mut word_end: Option<usize> = if self.cursor_at_word {
            Some(self.cursor)
        } else {
            None
        };

        while i < self.line.len() {
            let (cp, mut n_bytes) = if self.config.ascii_mode {
                (u32::from(self.line[i]), 1usize)
            } else {
                utf8::decode(&self.line[i..]).ok_or(Error::Overflow)?
            };

            let mut char_bytes = [0u8; 4];
            char_bytes[..n_bytes].copy_from_slice(&self.line[i..i + n_bytes]);

            let width = if cp == u32::from(b'\t') {
                classify::tab_width_at(self.config.tab_width, offset)
            } else {
                classify::charwidth(cp, self.config.ascii_mode).ok_or(Error::Overflow)?
            };
            if width > 0 {
                offset = offset.checked_add(width).ok_or(Error::Overflow)?;
            }

            let eol_found = classify::is_linefeed(cp);
            let ws_found = !eol_found && classify::is_whitespace(cp, self.config.ascii_mode);

            if self.state != State::Full {
                if !eol_found && !ws_found {
                    if self.eow > 0 {
                        self.eow_ww += width;
                    }
                    word_end = Some(i + n_bytes);
                } else {
                    if let Some(we) = word_end {
                        if offset > 0 {
                            self.eow = we;
                            self.eow_ss = 0;
                            self.eow_ww = 0;
                        }
                        word_end = None;
                    }
                    if self.eow > 0 {
                        self.eow_ss += n_bytes;
                    }
                }
            }

            'step: {
                if self.state == State::Wrap {
                    if self.config.break_at_spaces {
                        if ws_found && sol == i {
                            sol = i + n_bytes;
                            offset = self.indent_width;
                            break 'step;
                        }
                        if eol_found && i.checked_sub(n_bytes).is_some_and(|v| sol <= v) {
                            debug_assert!(offset <= self.config.max_width);
                            self.writer.write_all(b"\n")?;
                            if self.config.keep_indentation {
                                self.write_indent()?;
                                self.indent_reset();
                            }
                            self.writer.write_all(&self.line[sol..i + n_bytes])?;
                            sol = i + n_bytes;
                            offset = 0;
                            self.eow_reset();
                            self.state = State::Line;
                            break 'step;
                        }
                    }
                    self.writer.write_all(b"\n")?;
                    if eol_found {
                        if self.config.keep_indentation {
                            self.indent_reset();
                        }
                        sol = i + n_bytes;
                        offset = 0;
                        self.eow_reset();
                        self.state = State::Line;
                        break 'step;
                    }
                    if self.config.keep_indentation {
                        self.write_indent()?;
                    }
                    self.state = State::Word;
                } else if self.state == State::Line {
                    if self.config.keep_indentation {
                        if !self.indent_hanging && ws_found {
                            self.indent_feed(&char_bytes[..n_bytes], width)?;
                            break 'step;
                        } else if self.config.hang_punctuation {
                            let valid = classify::is_punctuation(
                                self.config.punctuation.as_deref(),
                                cp,
                            );
                            if valid {
                                for _ in 0..width {
                                    self.indent_feed(b" ", 1)?;
                                }
                                self.indent_hanging = true;
                                word_end = None;
                                break 'step;
                            }
                        }
                        self.state = State::Word;
                        if self.indent_width >= self.config.max_width {
                            self.state = State::Full;
                            self.indent_reset();
                        }
                    } else {
                        self.state = State::Word;
                    }
                }

                debug_assert!(self.state != State::Line);
                debug_assert!(self.state != State::Wrap);
                debug_assert!(sol <= i);

                if self.state == State::Full {
                    if eol_found {
                        self.writer.write_all(&self.line[sol..i + n_bytes])?;
                        sol = i + n_bytes;
                        offset = 0;
                        self.eow_reset();
                        self.state = State::Line;
                    }
                } else if offset > self.config.max_width {
                    if self.config.break_at_spaces && self.eow > 0 {
                        debug_assert!(self.eow > sol);
                        self.writer.write_all(&self.line[sol..self.eow])?;
                        sol = self.eow + self.eow_ss;
                        offset = self.indent_width + self.eow_ww;
                        debug_assert!(sol <= i + n_bytes);

                        if offset > self.config.max_width {
                            n_bytes = 0;
                            offset -= width;
                            self.eow_reset();
                            self.state = State::Wrap;
                            break 'step;
                        }
                        if !eol_found {
                            self.eow_reset();
                            self.state = State::Wrap;
                        } else {
                            self.writer.write_all(b"\n")?;
                            if self.config.keep_indentation {
                                self.write_indent()?;
                                self.indent_reset();
                            }
                            self.writer.write_all(&self.line[sol..i + n_bytes])?;
                            sol = i + n_bytes;
                            offset = 0;
                            self.eow_reset();
                            self.state = State::Line;
                        }
                    } else {
                        let mut advance = 0usize;
                        let skip_trailing_space =
                            ws_found && self.config.break_at_spaces && sol != i;

                        if !eol_found && !skip_trailing_space {
                            let char_too_wide = offset.checked_sub(width)
                                == Some(self.indent_width);
                            if sol == i || char_too_wide {
                                advance = n_bytes;
                                word_end = None;
                            }
                        }
                        self.writer.write_all(&self.line[sol..i + advance])?;
                        n_bytes = advance;
                        sol = i + advance;
                        offset = self.indent_width;
                        self.eow_reset();
                        self.state = State::Wrap;
                    }
                } else if eol_found {
                    self.writer.write_all(&self.line[sol..i + n_bytes])?;
                    if self.config.keep_indentation {
                        self.indent_reset();
                    }
                    sol = i + n_bytes;
                    offset = 0;
                    self.eow_reset();
                    self.state = State::Line;
                }
            }

            i += n_bytes;
        }

        if self.state == State::Full || self.stopped {
            if self.state == State::Wrap && i > sol {
                self.writer.write_all(b"\n")?;
                if self.config.keep_indentation {
                    self.write_indent()?;
                }
            }
            self.writer.write_all(&self.line[sol..i])?;
            self.cursor = 0;
            self.cursor_offset = offset;
            self.line.drain(0..i);
            self.eow_reset();
            // The scan always reaches the end of the buffer to get here, so this drain is
            // always a full drain: restore the soft flush threshold, mirroring the original's
            // buffer-shift reset on a fully drained line.
            self.max_size = self.max_capacity;
        } else {
            if self.eow > sol {
                self.eow -= sol;
            } else {
                self.eow_reset();
            }
            self.cursor = i - sol;
            self.cursor_offset = offset;
            self.cursor_at_word = word_end.is_some();
            if self.max_size > sol {
                self.max_size -= sol;
            } else {
                self.max_size = 0;
            }
            self.line.drain(0..sol);
        }

        Ok(())
    }
}
