// This file is part of the ufold package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! Integration coverage of the wrap engine's public surface, exercised end to end through
//! [`uu_ufold::Engine`] rather than its private internals.

use std::io;
use std::io::Write as _;
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use uu_ufold::{Config, Engine};

fn wrap(config: Config, input: &[u8]) -> String {
    let mut engine = Engine::new(config, Vec::new()).expect("engine construction");
    engine.feed(input).expect("feed");
    engine.stop().expect("stop");
    String::from_utf8(engine.into_inner()).expect("utf-8 output")
}

/// A `Write` sink that can be inspected while the engine still owns it, for tests that need
/// to assert on output produced by an intermediate `flush`, not just the final result.
#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn snapshot(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).expect("utf-8 output")
    }
}

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn default_width_wraps_long_paragraphs() {
    let config = Config::default();
    let input = "a ".repeat(60);
    let out = wrap(config, input.as_bytes());
    for line in out.lines() {
        assert!(line.chars().count() <= 78, "line too long: {line:?}");
    }
}

#[test]
fn zero_width_passes_through_unwrapped() {
    let config = Config {
        max_width: 0,
        ..Config::default()
    };
    let input = "a ".repeat(200) + "\n";
    let out = wrap(config, input.as_bytes());
    assert_eq!(out, input);
}

#[test]
fn break_at_spaces_prefers_whitespace_boundaries() {
    let config = Config {
        max_width: 10,
        break_at_spaces: true,
        ..Config::default()
    };
    let out = wrap(config, b"one two three four\n");
    for line in out.lines() {
        assert!(!line.starts_with(' '));
        assert!(line.chars().count() <= 10);
    }
}

#[test]
fn hard_breaks_split_unbreakable_words() {
    let config = Config {
        max_width: 5,
        break_at_spaces: true,
        ..Config::default()
    };
    let out = wrap(config, b"xxxxxxxxxxxxxxxx\n");
    let mut lines = out.lines();
    assert_eq!(lines.next(), Some("xxxxx"));
    assert_eq!(lines.next(), Some("xxxxx"));
}

#[test]
fn keep_indentation_repeats_leading_whitespace_on_continuations() {
    let config = Config {
        max_width: 12,
        keep_indentation: true,
        break_at_spaces: true,
        ..Config::default()
    };
    let out = wrap(config, b"    one two three four\n");
    let mut lines = out.lines();
    assert_eq!(lines.next(), Some("    one two"));
    let second = lines.next().expect("second line");
    assert!(second.starts_with("    "));
}

#[test]
fn hanging_punctuation_absorbs_into_indent() {
    let config = Config {
        max_width: 12,
        keep_indentation: true,
        hang_punctuation: true,
        break_at_spaces: true,
        ..Config::default()
    };
    let out = wrap(config, b"\"one two three four\n");
    let mut lines = out.lines();
    assert_eq!(lines.next(), Some("\"one two"));
    let second = lines.next().expect("second line");
    assert!(second.starts_with(' '), "continuation should hang: {second:?}");
}

#[test]
fn crlf_and_unicode_terminators_normalize_to_lf() {
    let config = Config::default();
    let out = wrap(config, b"a\r\nb\xe2\x80\xa8c\xe2\x80\xa9d\xc2\x85e\n");
    assert_eq!(out, "a\nb\nc\nd\ne\n");
}

#[test]
fn invalid_utf8_is_replaced_not_propagated() {
    let config = Config::default();
    let out = wrap(config, b"a\xffb\n");
    assert_eq!(out, "a?b\n");
}

#[test]
fn ascii_mode_counts_bytes_and_replaces_high_bytes() {
    let config = Config {
        ascii_mode: true,
        max_width: 3,
        break_at_spaces: false,
        ..Config::default()
    };
    let out = wrap(config, "\u{00e9}\u{00e9}\u{00e9}\u{00e9}\n".as_bytes());
    assert!(out.is_ascii());
}

#[test]
fn wide_characters_count_double_width_in_unicode_mode() {
    let config = Config {
        max_width: 5,
        break_at_spaces: false,
        ..Config::default()
    };
    let out = wrap(config, "\u{b250}\u{b250}\u{b250}\n".as_bytes());
    let mut lines = out.lines();
    assert_eq!(lines.next(), Some("\u{b250}\u{b250}"));
    assert_eq!(lines.next(), Some("\u{b250}"));
}

#[test]
fn feeding_in_small_chunks_matches_feeding_whole() {
    let input = b"the quick brown fox jumps over the lazy dog, again and again\n";

    let whole = wrap(Config::default(), input);

    let mut engine = Engine::new(Config::default(), Vec::new()).expect("engine construction");
    for chunk in input.chunks(3) {
        engine.feed(chunk).expect("feed");
    }
    engine.stop().expect("stop");
    let chunked = String::from_utf8(engine.into_inner()).expect("utf-8 output");

    assert_eq!(whole, chunked);
}

#[test]
fn stop_is_idempotent_and_feed_after_stop_errors() {
    let mut engine = Engine::new(Config::default(), Vec::new()).expect("engine construction");
    engine.feed(b"hello\n").expect("feed");
    engine.stop().expect("first stop");
    engine.stop().expect("second stop is a no-op");
    assert!(engine.feed(b"more").is_err());
}

#[test]
fn flush_releases_buffered_lines_incrementally() {
    let config = Config {
        max_width: 10,
        line_buffered: true,
        ..Config::default()
    };
    let buf = SharedBuf::default();
    let mut engine = Engine::new(config, buf.clone()).expect("engine construction");

    engine.feed(b"A\nB").expect("feed A\\nB");
    engine.flush().expect("flush after A\\nB");
    assert_eq!(buf.snapshot(), "A\n");

    engine.feed(b"\nC").expect("feed \\nC");
    engine.flush().expect("flush after \\nC");
    assert_eq!(buf.snapshot(), "A\nB\n");

    engine.feed(b"\xc2\x85D").expect("feed NEL D"); // U+0085 normalizes to LF
    engine.flush().expect("flush after NEL D");
    assert_eq!(buf.snapshot(), "A\nB\nC\n");

    engine.stop().expect("stop");
    assert_eq!(buf.snapshot(), "A\nB\nC\nD");
}
