// This file is part of the ufold package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! Command-line argument parsing and file/stdin plumbing.

use std::fs::File;
use std::io::{stdin, stdout, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use clap::{crate_version, Arg, ArgAction, Command};
use uucore::error::{UResult, USimpleError};
use uucore::format_usage;

use crate::config::Config;
use crate::engine::Engine;
use crate::error::CliError;

mod options {
    pub const WIDTH: &str = "width";
    pub const TAB: &str = "tab";
    pub const HANG: &str = "hang";
    pub const INDENT: &str = "indent";
    pub const SPACES: &str = "spaces";
    pub const BYTES: &str = "bytes";
    pub const FILE: &str = "file";
}

const USAGE: &str = "{} [OPTION]... [FILE]...";
const ABOUT: &str = "Wrap each paragraph in FILE(s) to fit a given display width, writing \
to standard output. With no FILE, or when FILE is -, read standard input.";

const DEFAULT_WIDTH: usize = 78;
const DEFAULT_TAB_WIDTH: usize = 8;

/// `default_missing_value` for `--hang`, standing in for "argument absent" (bare `-p`), which
/// must enable the preset set. This has to be distinguishable from `-p=` (argument present but
/// empty), which instead resets to disabled, so it cannot itself be the empty string.
const HANG_PRESET: &str = "\0";

pub fn uu_app() -> Command {
    Command::new(uucore::util_name())
        .version(crate_version!())
        .override_usage(format_usage(USAGE))
        .about(ABOUT)
        .infer_long_args(true)
        .arg(
            Arg::new(options::WIDTH)
                .short('w')
                .long(options::WIDTH)
                .value_name("WIDTH")
                .help("wrap lines at WIDTH columns (0 disables wrapping)")
                .display_order(1),
        )
        .arg(
            Arg::new(options::TAB)
                .short('t')
                .long(options::TAB)
                .value_name("WIDTH")
                .help("treat horizontal tabs as WIDTH columns wide")
                .display_order(2),
        )
        .arg(
            Arg::new(options::HANG)
                .short('p')
                .long(options::HANG)
                .value_name("CHARS")
                .num_args(0..=1)
                .default_missing_value(HANG_PRESET)
                .help(
                    "hang leading punctuation at the start of a line into the \
                     indent of its continuation lines; CHARS overrides the default set, \
                     and an empty CHARS (-p=) turns hanging back off",
                )
                .display_order(3),
        )
        .arg(
            Arg::new(options::INDENT)
                .short('i')
                .long(options::INDENT)
                .action(ArgAction::SetTrue)
                .help("preserve each line's leading whitespace on wrapped continuations")
                .display_order(4),
        )
        .arg(
            Arg::new(options::SPACES)
                .short('s')
                .long(options::SPACES)
                .action(ArgAction::SetTrue)
                .help("break lines at spaces rather than mid-word")
                .display_order(5),
        )
        .arg(
            Arg::new(options::BYTES)
                .short('b')
                .long(options::BYTES)
                .action(ArgAction::SetTrue)
                .help("count bytes rather than display columns, and treat input as ASCII")
                .display_order(6),
        )
        .arg(
            Arg::new(options::FILE)
                .value_name("FILE")
                .action(ArgAction::Append)
                .hide(true),
        )
}

fn parse_width(matches: &clap::ArgMatches, id: &str, default: usize) -> UResult<usize> {
    match matches.get_one::<String>(id) {
        None => Ok(default),
        Some(s) => s
            .parse::<usize>()
            .map_err(|_| USimpleError::new(1, format!("invalid {id} value: {s}"))),
    }
}

fn config_from_matches(matches: &clap::ArgMatches) -> UResult<Config> {
    let max_width = parse_width(matches, options::WIDTH, DEFAULT_WIDTH)?;
    let tab_width = parse_width(matches, options::TAB, DEFAULT_TAB_WIDTH)?;
    let ascii_mode = matches.get_flag(options::BYTES);
    let break_at_spaces = matches.get_flag(options::SPACES);
    let keep_indentation = matches.get_flag(options::INDENT);

    // `-p` absent entirely: hanging stays off. Bare `-p` (no `=CHARS`): preset enabled. `-p=`
    // (argument explicitly empty): reset to disabled. `-p=CHARS`: explicit set.
    let (hang_punctuation, punctuation) = match matches.get_one::<String>(options::HANG) {
        None => (false, None),
        Some(chars) if chars == HANG_PRESET => (true, None),
        Some(chars) if chars.is_empty() => (false, None),
        Some(chars) => (true, Some(chars.chars().collect())),
    };

    Ok(Config {
        max_width,
        tab_width,
        keep_indentation,
        hang_punctuation,
        punctuation,
        break_at_spaces,
        ascii_mode,
        // Always line-buffered, matching the reference CLI: every read that contains a line
        // feed is followed by an explicit flush in `process_source`, so output keeps pace
        // with input instead of waiting for the internal buffer to fill.
        line_buffered: true,
    })
}

/// Read one source (stdin, or a named file) to completion through `engine`.
///
/// A directory or an unreadable file is reported and skipped; processing continues with any
/// remaining sources, matching GNU-style multi-file tools that accumulate failures instead of
/// aborting on the first one.
fn process_source<W: Write>(
    path: &str,
    engine: &mut Engine<W>,
) -> Result<(), CliError> {
    let mut reader: Box<dyn Read> = if path.is_empty() || path == "-" {
        Box::new(stdin())
    } else {
        let p = Path::new(path);
        if p.is_dir() {
            return Err(CliError::IsDirectory(PathBuf::from(path)));
        }
        Box::new(File::open(p).map_err(|e| CliError::CannotOpen(PathBuf::from(path), e))?)
    };

    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = reader
            .read(&mut buf)
            .map_err(|e| CliError::CannotRead(PathBuf::from(path), e))?;
        if n == 0 {
            break;
        }
        let chunk = &buf[..n];
        engine.feed(chunk).map_err(CliError::Engine)?;
        if chunk.contains(&b'\n') {
            engine.flush().map_err(CliError::Engine)?;
        }
    }
    Ok(())
}

pub fn uumain(args: impl uucore::Args) -> UResult<()> {
    let matches = uu_app().try_get_matches_from(args).map_err(|e| {
        USimpleError::new(e.exit_code(), e.to_string())
    })?;

    let config = config_from_matches(&matches)?;

    let files: Vec<String> = matches
        .get_many::<String>(options::FILE)
        .map(|vals| vals.map(String::from).collect())
        .unwrap_or_default();
    let files = if files.is_empty() {
        vec!["-".to_owned()]
    } else {
        files
    };

    let stdout = stdout();
    let writer = BufWriter::new(stdout.lock());
    let mut engine = Engine::new(config, writer).map_err(CliError::Engine)?;

    let mut had_error = false;
    for path in &files {
        if let Err(e) = process_source(path, &mut engine) {
            had_error = true;
            eprintln!("{}: {e}", uucore::util_name());
            if matches!(e, CliError::Engine(_)) {
                break;
            }
        }
    }
    engine.stop().map_err(CliError::Engine)?;

    if had_error {
        Err(USimpleError::new(1, "one or more inputs could not be processed"))
    } else {
        Ok(())
    }
}
