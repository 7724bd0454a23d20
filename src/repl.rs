//! Interactive front-end over [`crate::Interpreter`].
//!
//! Generalizes the original REPL's three commands (`help`, `run`, an
//! arbitrary file path) onto `rustyline` for line editing and history instead
//! of a bare `input()` loop.

use std::fs;
use std::path::Path;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::config::Config;
use crate::error::ConfigError;
use crate::Interpreter;

const PROMPT: &str = "streamql> ";

const HELP_TEXT: &str = "\
Commands:
  help            Show this message.
  run             Execute the script named by the config's main_src key.
  <path>          Execute the file at <path> as a sequence of commands.
  <ctrl-d>        Exit.

Anything else is parsed directly as a command: (@new ...) inserts, anything
else queries the current knowledge base.";

/// Run the interactive loop, printing every query solution to stdout.
///
/// `config` carries the result of loading the config file at startup. A
/// load failure does not stop the REPL from starting: it is only surfaced
/// when the user types `run`, which is the one command that needs
/// `main_src`. Every other command (a file path, or a command typed
/// directly) works with no config file at all.
pub fn run(config: Result<Config, ConfigError>) -> rustyline::Result<()> {
    let mut editor = DefaultEditor::new()?;
    let mut interp = Interpreter::new(|line| println!("{line}"));

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line)?;
                match line {
                    "help" => println!("{HELP_TEXT}"),
                    "run" => run_default(&mut interp, &config),
                    path if looks_like_path(path) => run_file(&mut interp, path),
                    command => run_command(&mut interp, command),
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                tracing::error!(%err, "readline failure");
                break;
            }
        }
    }
    Ok(())
}

fn run_default(interp: &mut Interpreter, config: &Result<Config, ConfigError>) {
    match config {
        Ok(config) => run_file(interp, &config.main_src),
        Err(err) => {
            tracing::error!(%err, "could not resolve default script");
            eprintln!("error: {err}");
        }
    }
}

fn looks_like_path(line: &str) -> bool {
    !line.starts_with('(') && Path::new(line).is_file()
}

fn run_file(interp: &mut Interpreter, path: &str) {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            eprintln!("error: could not read '{path}': {err}");
            return;
        }
    };
    for line in contents.lines().map(str::trim).filter(|l| !l.is_empty()) {
        run_command(interp, line);
    }
}

fn run_command(interp: &mut Interpreter, command: &str) {
    if let Err(err) = interp.run(command) {
        tracing::error!(%err, command, "command failed");
        eprintln!("error: {err}");
    }
}
