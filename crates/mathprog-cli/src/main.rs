//! MathProg CLI - tokenize GMPL/MathProg source and show the highlighting.

use std::env;
use std::fs;
use std::path::Path;

use mathprog::{lexer_for, tokenize_line, Lexer, Strategy, Token};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const VERSION: &str = "0.1.0";

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Vec<String>) -> Result<(), String> {
    let mut eval_code: Option<String> = None;
    let mut interactive = false;
    let mut strategy = Strategy::Fsa;
    let mut file: Option<String> = None;

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];

        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            "-v" | "--version" => {
                print_version();
                return Ok(());
            }
            "-e" | "--eval" => {
                i += 1;
                if i >= args.len() {
                    return Err("-e requires an argument".to_string());
                }
                eval_code = Some(args[i].clone());
            }
            "-i" | "--interactive" => {
                interactive = true;
            }
            "--lexer" => {
                i += 1;
                if i >= args.len() {
                    return Err("--lexer requires an argument".to_string());
                }
                strategy = args[i].parse().map_err(|e| format!("{}", e))?;
            }
            arg if arg.starts_with('-') => {
                return Err(format!("Unknown option: {}", arg));
            }
            _ => {
                file = Some(arg.clone());
                break;
            }
        }
        i += 1;
    }

    let lexer = lexer_for(strategy).map_err(|e| format!("{}", e))?;

    if let Some(code) = eval_code {
        print_source(lexer.as_ref(), &code);

        if interactive {
            start_repl(lexer.as_ref())?;
        }
    } else if let Some(filepath) = file {
        let source = read_file(&filepath)?;
        print_source(lexer.as_ref(), &source);

        if interactive {
            start_repl(lexer.as_ref())?;
        }
    } else {
        start_repl(lexer.as_ref())?;
    }

    Ok(())
}

fn print_usage() {
    println!(
        r#"
MathProg v{} - GMPL/MathProg syntax tokenizer

Usage:
  mathprog [options] [file]

Options:
  -h, --help         Show this help message
  -v, --version      Show version
  -e, --eval         Tokenize source from the command line
  -i, --interactive  Start the REPL after tokenizing
  --lexer <name>     Tokenizer strategy: fsa (default) or dispatch

Examples:
  mathprog                     Start the interactive REPL
  mathprog model.mod           Tokenize a model file
  mathprog -e "param n := 3;"  Tokenize one statement
  mathprog --lexer dispatch model.mod
"#,
        VERSION
    );
}

fn print_version() {
    println!("MathProg {}", VERSION);
}

fn read_file(filepath: &str) -> Result<String, String> {
    let path = Path::new(filepath);

    if !path.exists() {
        return Err(format!("File not found: {}", filepath));
    }

    fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))
}

/// Tokenize a buffer line by line and print the categorized runs.
fn print_source(lexer: &dyn Lexer, source: &str) {
    let mut state = lexer.start_state();
    for line in source.lines() {
        print_tokens(&tokenize_line(lexer, line, &mut state));
    }
}

fn print_tokens(tokens: &[Token]) {
    for token in tokens {
        if token.text.trim().is_empty() {
            continue;
        }
        let category = token
            .category
            .map_or_else(|| "-".to_string(), |c| c.to_string());
        println!("{:>10}  {}", category, token.text);
    }
}

/// Interactive tokenizer. One lexer state is threaded across every entered
/// line, so an opened block comment keeps highlighting until it is closed.
fn start_repl(lexer: &dyn Lexer) -> Result<(), String> {
    println!("MathProg v{} - Type 'exit' or Ctrl+D to quit", VERSION);
    println!();

    let mut rl = DefaultEditor::new()
        .map_err(|e| format!("Failed to create editor: {}", e))?;

    let mut state = lexer.start_state();

    loop {
        match rl.readline(">>> ") {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed == "exit" || trimmed == "quit" {
                    println!("Goodbye!");
                    break;
                }

                if trimmed == "reset" {
                    state = lexer.start_state();
                    continue;
                }

                if !trimmed.is_empty() {
                    rl.add_history_entry(trimmed).ok(); // Ignore history errors
                }

                print_tokens(&tokenize_line(lexer, &line, &mut state));
            }
            Err(ReadlineError::Interrupted) => {
                state = lexer.start_state();
                println!("^C");
            }
            Err(ReadlineError::Eof) => {
                println!("\nGoodbye!");
                break;
            }
            Err(e) => {
                return Err(format!("Readline error: {}", e));
            }
        }
    }

    Ok(())
}
