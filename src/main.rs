use ans_calculator::*;
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Report, WrapErr};
use std::io::{self, BufRead, Write};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the tokens an equation is accepted as.
    Tokenize { equation: String },
    /// Evaluate one equation left to right.
    Eval {
        equation: String,
        /// Value `ANS` stands for.
        #[arg(long)]
        ans: Option<f64>,
    },
    /// Type equations into an interactive calculator.
    Calc {
        /// Number of history rows kept.
        #[arg(long, default_value_t = DEFAULT_HISTORY_ROWS)]
        history: usize,
    },
}

fn main() -> miette::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Tokenize { equation } => {
            let tokens = validate(&equation)?;
            for kind in tokens.kinds() {
                println!("{:?}", kind);
            }
        }
        Commands::Eval { equation, ans } => {
            let tokens = validate(&equation)?;
            if let Some(result) = evaluate(&tokens, ans)? {
                println!("{result}");
            }
        }
        Commands::Calc { history } => {
            let mut calc = Calculator::new(history);
            let stdin = io::stdin();
            let mut lines = stdin.lock().lines();

            loop {
                print!("calc> ");
                io::stdout().flush().into_diagnostic()?;

                let input = match lines.next() {
                    Some(line) => line.into_diagnostic().wrap_err("reading stdin failed")?,
                    None => break,
                };
                let input = input.trim();

                match input {
                    "" => continue,
                    "exit" => break,
                    "ac" => {
                        report(calc.press(Button::Clear));
                        continue;
                    }
                    "back" => {
                        report(calc.press(Button::Backspace));
                        println!("{}", calc.input());
                        continue;
                    }
                    "history" => {
                        let rows = calc.history();
                        println!("{}/{} rows", rows.len(), rows.capacity());
                        for entry in rows.iter() {
                            println!("{entry}");
                        }
                        continue;
                    }
                    _ => {}
                }

                for button in buttons(input) {
                    match button {
                        Some(button) => report(calc.press(button)),
                        None => eprintln!("ignored key in {input:?}"),
                    }
                }
                report(calc.press(Button::Equals));
            }
        }
    }

    Ok(())
}

/// Splits a typed line into key presses, grouping `ANS`.
fn buttons(line: &str) -> Vec<Option<Button>> {
    let mut presses = Vec::new();
    let mut rest = line;

    while let Some(c) = rest.chars().next() {
        if let Some(after) = rest.strip_prefix(ANSWER_PLACEHOLDER) {
            presses.push(Some(Button::Key(Key::Answer)));
            rest = after;
            continue;
        }
        presses.push(Key::from_char(c).map(Button::Key));
        rest = &rest[c.len_utf8()..];
    }

    presses
}

fn report(outcome: Result<Outcome, ValidationError>) {
    match outcome {
        Ok(Outcome::Computed(entry)) => println!("{entry}"),
        Ok(Outcome::HistoryCleared) => println!("history cleared"),
        Ok(_) => {}
        Err(err) => eprintln!("{:?}", Report::new(err)),
    }
}
