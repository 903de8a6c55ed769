use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use expression_calculator::interpreter::derivation::Derivation;
use expression_calculator::interpreter::evaluator::evaluate;
use expression_calculator::interpreter::lexer::tokenize;
use expression_calculator::interpreter::parser::parse;
use expression_calculator::interpreter::tokens_to_string;
use std::io;
use std::io::Write;

/// Parses and evaluates an arithmetic expression, showing how it was derived
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Arguments {
    /// The expression to evaluate. Read from standard input when left out
    expression: Option<String>,

    /// Do not list the scanned tokens
    #[clap(long)]
    hide_tokens: bool,

    /// Do not list the derivation steps
    #[clap(long)]
    hide_derivation: bool,

    #[clap(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn main() -> Result<()> {
    let args = Arguments::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .parse_default_env()
        .init();

    let expression = match &args.expression {
        Some(expression) => expression.clone(),
        None => read_expression()?,
    };
    log::info!("Calculating {:?}", expression);

    run(&expression, &args)
}

fn read_expression() -> Result<String> {
    print!("Enter a mathematical expression: ");
    io::stdout().flush().context("could not flush standard output")?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("could not read expression from standard input")?;
    Ok(line.trim_end().to_string())
}

fn run(expression: &str, args: &Arguments) -> Result<()> {
    if !args.hide_tokens {
        println!("\nTokens:");
        println!("{}", tokenize(expression));
    }

    println!("\nSyntax Analysis (Parse Tree):");
    let mut derivation = Derivation::new();
    let outcome = match parse(expression, &mut derivation) {
        Ok(tree) => {
            print!("{}", tree);
            println!("{:?}", tree);
            println!("{}", tokens_to_string(tree.to_infix())?);

            println!("\nAST Evaluation:");
            evaluate(&tree)
                .map(|value| println!("Result: {}", value))
                .with_context(|| format!("could not evaluate {:?}", expression))
        }
        Err(error) => Err::<(), _>(error).with_context(|| format!("could not parse {:?}", expression)),
    };

    if !args.hide_derivation {
        println!("\nDerivation Steps:");
        println!("{}", derivation);
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn arguments_are_well_formed() {
        Arguments::command().debug_assert();
    }

    #[test]
    fn expression_and_flags_are_parsed() {
        let args =
            Arguments::try_parse_from(["calc", "--hide-tokens", "-v", "2 + 3"]).unwrap();

        assert_eq!(args.expression.as_deref(), Some("2 + 3"));
        assert!(args.hide_tokens);
        assert!(!args.hide_derivation);
        assert_eq!(args.verbose.log_level_filter(), log::LevelFilter::Info);
    }

    #[test]
    fn failed_evaluation_is_returned_as_error() {
        let args = Arguments::try_parse_from(["calc", "1/0"]).unwrap();

        let error = run("1/0", &args).unwrap_err();

        assert!(format!("{:#}", error).contains("division by zero"));
    }

    #[test]
    fn successful_calculation_runs_to_completion() {
        let args = Arguments::try_parse_from(["calc", "--hide-derivation", "5!"]).unwrap();

        run("5!", &args).unwrap();
    }

    #[test]
    fn deeply_nested_expression_is_returned_as_error() {
        let expression = format!("{}1{}", "(".repeat(5_000), ")".repeat(5_000));
        let args = Arguments::try_parse_from(["calc", "--hide-tokens", expression.as_str()]).unwrap();

        let error = run(&expression, &args).unwrap_err();

        assert!(format!("{:#}", error).contains("nested too deeply"));
    }
}
