use std::{env, fs::read_to_string, path::Path, process, rc::Rc, time::Instant};

use quack::{
    ast::ast::format_program, errors::errors::Error, format_error, lexer::lexer::tokenize,
    parser::parser::parse, scope::scope::analyze,
};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: {} <file>", args.first().map(String::as_str).unwrap_or("quack"));
        process::exit(2);
    }

    let file_path: &str = &args[1];
    let file_name = Path::new(file_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_path.to_string());

    let file_contents = match read_to_string(file_path) {
        Ok(contents) => contents,
        Err(err) => {
            eprintln!("Failed to read {}: {}", file_path, err);
            process::exit(1);
        }
    };

    match run(file_contents, &file_name) {
        Ok(formatted) => print!("{}", formatted),
        Err(error) => {
            print!("{}", format_error(&error, file_path));
            process::exit(1);
        }
    }
}

/// Runs every front-end phase over `source`, returning the canonical
/// rendering of the program.
fn run(source: String, file_name: &str) -> Result<String, Error> {
    let start = Instant::now();
    let source = Rc::new(source);

    let tokens = tokenize(source.to_string(), Some(file_name.to_string()))?;

    println!("Tokenized in {:?}", start.elapsed());

    let parse_start = Instant::now();
    let ast = parse(tokens, Rc::clone(&source))?;

    println!("Parsed in {:?}", parse_start.elapsed());

    let analyze_start = Instant::now();
    analyze(&ast).map_err(|error| error.with_source(Rc::clone(&source)))?;

    println!("Analyzed in {:?}", analyze_start.elapsed());
    println!("Total time: {:?}", start.elapsed());

    Ok(format_program(&ast))
}
