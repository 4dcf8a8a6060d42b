use clap::{App, Arg};
use once_cell::sync::OnceCell;
use regex::Regex;
use std::{
    collections::VecDeque,
    fs::File,
    io::{self, BufRead, BufReader, Write},
};

pub mod error;

pub use error::TailError;

static COUNT_REG: OnceCell<Regex> = OnceCell::new();

type TailResult<T> = Result<T, TailError>;

#[derive(Debug)]
pub struct Config {
    file: Option<String>,
    lines: usize,
}

pub fn get_args() -> TailResult<Config> {
    let matches = App::new("tailr")
        .version("0.1.0")
        .author("Marcin Rogowski <rogowskimarcin11@gmail.com>")
        .about("Rust tail")
        .arg(
            Arg::with_name("lines")
                .short("n")
                .long("lines")
                .value_name("LINES")
                .default_value("5")
                .number_of_values(1)
                .takes_value(true)
                .allow_hyphen_values(true)
                .help("Number of lines"),
        )
        .arg(
            Arg::with_name("file")
                .value_name("FILE")
                .takes_value(true)
                .help("Input file, stdin when omitted"),
        )
        .get_matches();

    let lines = parse_tail_count(matches.value_of("lines").unwrap())?;

    Ok(Config {
        file: matches.value_of("file").map(str::to_string),
        lines,
    })
}

pub fn run(config: Config) -> TailResult<()> {
    let stream = open(config.file.as_deref())?;
    let lines = tail_lines(Some(stream), config.lines)?;

    let stdout = io::stdout();
    print_lines(&lines, &mut stdout.lock()).map_err(TailError::WriteOutput)?;

    Ok(())
}

fn parse_tail_count(val: &str) -> TailResult<usize> {
    let is_count = COUNT_REG
        .get_or_init(|| Regex::new(r"^\d+$").unwrap())
        .is_match(val);
    if !is_count {
        return Err(TailError::BadLineCount {
            value: val.to_string(),
        });
    }
    // A run of digits can still overflow usize
    val.parse().map_err(|_| TailError::BadLineCount {
        value: val.to_string(),
    })
}

fn open(filename: Option<&str>) -> TailResult<Box<dyn BufRead>> {
    match filename {
        None | Some("-") => Ok(Box::new(BufReader::new(io::stdin()))),
        Some(path) => match File::open(path) {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) => Err(TailError::FileOpen {
                path: path.to_string(),
                source: e,
            }),
        },
    }
}

/// Window over the most recently seen lines, bounded at `capacity`.
/// Pushing at capacity evicts the oldest entry first.
#[derive(Debug)]
struct LineWindow {
    lines: VecDeque<String>,
    capacity: usize,
}

impl LineWindow {
    fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn push(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    fn into_lines(self) -> Vec<String> {
        self.lines.into()
    }
}

/// Read `stream` to end-of-stream and return its last `count` lines,
/// oldest first, without the trailing newline. A final line with no
/// newline counts as a line. `None` means the caller never opened the
/// stream and is rejected up front; `count == 0` returns without
/// touching the stream at all.
pub fn tail_lines(stream: Option<impl BufRead>, count: usize) -> TailResult<Vec<String>> {
    let mut stream = stream.ok_or(TailError::InvalidStream)?;

    if count == 0 {
        return Ok(Vec::new());
    }

    let mut window = LineWindow::new(count);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let bytes = stream
            .read_until(b'\n', &mut buf)
            .map_err(TailError::StreamRead)?;
        if bytes == 0 {
            break;
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        window.push(String::from_utf8_lossy(&buf).into_owned());
    }

    Ok(window.into_lines())
}

/// Write every line newline-terminated; the one place terminators are
/// normalized.
pub fn print_lines(lines: &[String], out: &mut impl Write) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
