use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser as ClapParser;
use log::{debug, error};

use monkey::{eval_program, Environment, Lexer, Object, Parser};

#[derive(ClapParser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Script to execute. Starts the REPL when omitted.
    file: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,

    /// Print the parsed program's `Display` form before evaluating it.
    #[arg(long)]
    emit_ast: bool,
}

fn main() {
    let args = Cli::parse();
    let level = if args.verbose { log::Level::Trace } else { log::Level::Warn };
    simple_logger::init_with_level(level).unwrap();

    match &args.file {
        Some(path) => run_file(path, args.emit_ast),
        None => run_repl(args.emit_ast),
    }
}

fn run_file(path: &PathBuf, emit_ast: bool) {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            error!("could not read file '{}': {err}", path.to_string_lossy());
            std::process::exit(1);
        }
    };

    let env = Environment::new();
    match evaluate(&source, emit_ast, &env) {
        Ok(result) => println!("{result}"),
        Err(messages) => {
            eprintln!("ERRORS:");
            for message in messages {
                eprintln!("\t{message}");
            }
            std::process::exit(1);
        }
    }
}

fn run_repl(emit_ast: bool) {
    let env = Environment::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!(">> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        if line.trim().is_empty() {
            break;
        }

        match evaluate(&line, emit_ast, &env) {
            Ok(result) => println!("{result}"),
            Err(messages) => {
                println!("ERRORS:");
                for message in messages {
                    println!("\t{message}");
                }
            }
        }
    }
}

/// Runs one chunk of source through lexer -> parser -> evaluator against the
/// given (long-lived) environment. `Err` carries the lexer's and parser's
/// error strings; the evaluator itself never fails this function, since
/// runtime errors are first-class `Object::Error` values printed like any
/// other result.
fn evaluate(source: &str, emit_ast: bool, env: &std::rc::Rc<std::cell::RefCell<monkey::environment::Environment>>) -> Result<Object, Vec<String>> {
    let lexer = Lexer::new(source);
    let mut parser = Parser::new(lexer);
    let program = parser.parse_program();

    if !parser.lex_errors().is_empty() || !parser.errors().is_empty() {
        let mut messages: Vec<String> = parser.lex_errors().iter().map(|e| e.to_string()).collect();
        messages.extend(parser.errors().iter().map(|e| e.to_string()));
        return Err(messages);
    }

    if emit_ast {
        debug!("parsed program: {program}");
        println!("{program}");
    }

    Ok(eval_program(&program, env))
}
