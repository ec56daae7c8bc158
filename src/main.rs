use std::{
    fs,
    io::{self, stdin, IsTerminal},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use flinq::config::{Config, DEFAULT_MAX_DEPTH, DEFAULT_MAX_EVAL_DEPTH};
use flinq::interpreter::Interpreter;
use rustyline::error::ReadlineError;
use rustyline::validate::MatchingBracketValidator;
use rustyline::Editor;
use rustyline::{Completer, Helper, Highlighter, Hinter, Validator};
use std::error::Error;

/// flinq evaluates small expression programs: arithmetic, strings,
/// `let` bindings, `if` expressions, functions and constants.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Program file. Statements end with `;` at the end of a line.
    file: Option<PathBuf>,

    /// Run this source text instead of a file.
    #[arg(short, long, conflicts_with = "file")]
    eval: Option<String>,

    /// Maximum expression nesting and call depth.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Maximum nesting of evaluated expressions.
    #[arg(long, default_value_t = DEFAULT_MAX_EVAL_DEPTH)]
    max_eval_depth: usize,

    /// Seed for `Random`, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn config(&self) -> Config {
        let config = Config::default()
            .with_max_depth(self.max_depth)
            .with_max_eval_depth(self.max_eval_depth);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    let mut interpreter = Interpreter::with_config(args.config());

    let res = if let Some(source) = &args.eval {
        run_source(source, &mut interpreter);
        Ok(())
    } else if let Some(path) = &args.file {
        run_file(path, &mut interpreter)
    } else {
        run_prompt(&mut interpreter)
    };

    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

// Text files end lines with `\n` or `\r\n`; the language separates lines with `\r`.
fn normalize(source: &str) -> String {
    source.replace("\r\n", "\r").replace('\n', "\r")
}

fn run_source(source: &str, interpreter: &mut Interpreter) {
    for line in interpreter.interpret(&normalize(source)) {
        println!("{}", line);
    }
}

fn run_file(path: &Path, interpreter: &mut Interpreter) -> Result<(), Box<dyn Error>> {
    let content = fs::read_to_string(path)
        .map_err(|err| format!("cannot read {}: {}", path.display(), err))?;
    run_source(&content, interpreter);
    Ok(())
}

#[derive(Helper, Completer, Hinter, Highlighter, Validator)]
struct PromptHelper {
    #[rustyline(Completer)]
    completer: (),
    #[rustyline(Validator)]
    validator: MatchingBracketValidator,
}

fn run_prompt(interpreter: &mut Interpreter) -> Result<(), Box<dyn Error>> {
    if !stdin().is_terminal() {
        let program = io::read_to_string(stdin().lock())?;
        run_source(&program, interpreter);
        return Ok(());
    }

    let h = PromptHelper {
        completer: (),
        validator: MatchingBracketValidator::new(),
    };
    let mut rl = Editor::new()?;
    rl.set_helper(Some(h));

    // Every line is one statement.
    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                for out in interpreter.interpret(&line) {
                    println!("{}", out);
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(()),
            Err(err) => return Err(Box::new(err)),
        }
    }
}
