//! XaviEdit - a lightweight multi-tab source code editor for the terminal

mod buffer;
mod command;
mod config;
mod display;
mod editor;
mod error;
mod file_ops;
mod gateway;
mod input;
mod line;
mod logging;
mod prompt;
mod session;
mod syntax;
mod terminal;
mod view;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use tracing::warn;

use config::Config;
use editor::EditorState;
use error::{EditorError, Result};
use terminal::Terminal;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-V" => {
                print_version();
                return Ok(());
            }
            "--export-html" => {
                let Some(path) = iter.next() else {
                    return Err(EditorError::Usage("--export-html needs a file".to_string()));
                };
                return export_html(Path::new(path));
            }
            _ => {}
        }
    }

    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    logging::init(&config.log_level);
    if let Some(e) = config_error {
        warn!(error = %e, "ignoring config file");
    }

    // Initialize terminal
    let terminal = Terminal::new()?;
    let mut editor = EditorState::new(terminal, config);
    if let Some(path) = launch_file(&args) {
        editor.request_open(path);
    }

    editor.run()
}

/// The first argument that is not a flag names the file to open at launch
///
/// Host applications pass their own flags (and flag values such as
/// `-line 10` after the file), so anything starting with `-` is skipped.
fn launch_file(args: &[String]) -> Option<PathBuf> {
    args.iter()
        .find(|arg| !arg.starts_with('-'))
        .map(PathBuf::from)
}

/// Print `path` as a highlighted HTML document
fn export_html(path: &Path) -> Result<()> {
    let raw = fs::read_to_string(path).map_err(|e| EditorError::from_io(path, e))?;
    let source = line::normalize_line_endings(&raw);
    let name = syntax::base_name(&path.to_string_lossy()).to_string();
    let tokens = syntax::tokenize(&source, &syntax::extension_of(&name));
    print!("{}", syntax::render_document(&name, &source, &tokens));
    Ok(())
}

fn print_usage() {
    println!("XaviEdit {} - multi-tab source code editor", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: xaviedit [OPTIONS] [FILE]");
    println!();
    println!("Options:");
    println!("  -h, --help            Show this help message");
    println!("  -V, --version         Show version information");
    println!("  --export-html FILE    Print FILE as highlighted HTML and exit");
    println!();
    println!("Key bindings:");
    println!("  Ctrl+N, Ctrl+T        New file");
    println!("  Ctrl+O                Open file");
    println!("  Ctrl+S                Save");
    println!("  Alt+S                 Save as");
    println!("  Ctrl+W                Close tab");
    println!("  Ctrl+Tab, Ctrl+PgDn   Next tab");
    println!("  Ctrl+Shift+Tab,");
    println!("  Ctrl+PgUp             Previous tab");
    println!("  Tab                   Insert spaces");
    println!("  Esc, Ctrl+G           Cancel prompt");
    println!("  Ctrl+Q                Quit");
    println!();
    println!("Settings are read from ~/.xaviedit.toml; logs go to ~/.xaviedit/logs/");
}

fn print_version() {
    println!("XaviEdit {}", env!("CARGO_PKG_VERSION"));
}
