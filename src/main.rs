use monkey_eval::{repl, Environment};
use std::{env, fs, io, process};

/// Installs a stderr subscriber, but only when `RUST_LOG` asks for one.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn run_file(path: &str) -> i32 {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("could not read {}: {}", path, err);
            return 1;
        }
    };

    match repl::run_source(&source, &Environment::new()) {
        Ok(result) => {
            println!("{}", result);
            0
        }
        Err(err) => {
            eprintln!("{}", err);
            1
        }
    }
}

fn main() {
    init_tracing();

    if let Some(path) = env::args().nth(1) {
        process::exit(run_file(&path));
    }

    println!("Hello! This is the Monkey programming language!");
    println!("Feel free to type in commands");
    let stdin = io::stdin();
    if let Err(err) = repl::start(stdin.lock(), io::stdout()) {
        eprintln!("{}", err);
        process::exit(1);
    }
}
