//! Clay Headless Console Runner
//!
//! Feeds text into a console backed by the headless backend and prints the
//! final state. Input is either written as program output or typed key by
//! key into the readline loop.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use clay_console::{
    AsciiCharset, Config, EnUsKeyMap, HeadlessBackend, Key, KeyEvent, MainConsole, Modifiers,
};

/// Prompt printed before each line in readline mode
const PROMPT: &str = "] ";

/// CLI arguments for the headless runner
#[derive(Parser, Debug)]
#[command(name = "clay-headless")]
#[command(version)]
#[command(about = "Run a console headlessly and print its final state", long_about = None)]
struct CliArgs {
    /// Read input from this file instead of stdin
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Path to a JSON config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of rows
    #[arg(short, long)]
    rows: Option<usize>,

    /// Number of columns
    #[arg(short = 'C', long)]
    cols: Option<usize>,

    /// Type the input into the readline loop instead of writing it
    #[arg(long)]
    readline: bool,

    /// Snapshot output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = CliArgs::parse();

    let mut config = match &args.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::load_or_default(),
    };
    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(cols) = args.cols {
        config.cols = cols;
    }

    let charset = AsciiCharset::new();
    let backend = HeadlessBackend::new(&charset);
    let mut console = match MainConsole::new(backend, Box::new(charset), EnUsKeyMap, &config) {
        Ok(console) => console,
        Err(e) => {
            eprintln!("Error creating console: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let input = match read_input(args.input.as_ref()) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Error reading input: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.readline {
        run_readline(&mut console, &input);
    } else {
        console.write(&input);
    }

    let snapshot = console.snapshot();
    match args.format {
        OutputFormat::Text => {
            println!("Console State ({}x{}):", snapshot.rows, snapshot.cols);
            println!("Cursor: ({}, {})", snapshot.cursor.row, snapshot.cursor.col);
            println!("---");
            print!("{}", snapshot.to_text());
            println!("---");
        }
        OutputFormat::Json => match snapshot.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing snapshot: {}", e);
                return ExitCode::FAILURE;
            }
        },
    }

    ExitCode::SUCCESS
}

fn read_input(path: Option<&PathBuf>) -> io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut data = String::new();
            io::stdin().read_to_string(&mut data)?;
            Ok(data)
        }
    }
}

/// Type `input` key by key, echoing each finished line back until `exit`
fn run_readline(console: &mut MainConsole<HeadlessBackend, EnUsKeyMap>, input: &str) {
    console.write(PROMPT);
    console.start_read_line_loop(|line, console| {
        if line == "exit" {
            return false;
        }
        console.write_line(line);
        console.write(PROMPT);
        true
    });

    for c in input.chars() {
        if !console.is_reading_line() {
            break;
        }
        match key_for(c) {
            Some((key, modifiers)) => console.handle_key_event(KeyEvent::pressed(key, modifiers)),
            None => tracing::debug!("No key types U+{:04X}", c as u32),
        }
    }
    console.stop_read_line_loop();
}

/// The US key press that produces `c`
fn key_for(c: char) -> Option<(Key, Modifiers)> {
    const SHIFTED_DIGITS: &str = ")!@#$%^&*(";
    const PUNCTUATION: [(Key, char, char); 11] = [
        (Key::BackQuote, '`', '~'),
        (Key::Minus, '-', '_'),
        (Key::Equals, '=', '+'),
        (Key::LeftBracket, '[', '{'),
        (Key::RightBracket, ']', '}'),
        (Key::Backslash, '\\', '|'),
        (Key::Semicolon, ';', ':'),
        (Key::Quote, '\'', '"'),
        (Key::Comma, ',', '<'),
        (Key::Period, '.', '>'),
        (Key::Slash, '/', '?'),
    ];

    let key = match c {
        'a'..='z' => (Key::Letter(c), Modifiers::NONE),
        'A'..='Z' => (Key::Letter(c.to_ascii_lowercase()), Modifiers::SHIFT),
        '0'..='9' => (Key::Digit(c as u8 - b'0'), Modifiers::NONE),
        ' ' => (Key::Space, Modifiers::NONE),
        '\t' => (Key::Tab, Modifiers::NONE),
        '\n' => (Key::Return, Modifiers::NONE),
        '\u{8}' | '\u{7f}' => (Key::Backspace, Modifiers::NONE),
        _ => {
            if let Some(n) = SHIFTED_DIGITS.find(c) {
                return Some((Key::Digit(n as u8), Modifiers::SHIFT));
            }
            return PUNCTUATION.iter().find_map(|&(key, normal, shifted)| {
                if c == normal {
                    Some((key, Modifiers::NONE))
                } else if c == shifted {
                    Some((key, Modifiers::SHIFT))
                } else {
                    None
                }
            });
        }
    };
    Some(key)
}
