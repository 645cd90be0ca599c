use monkey_eval::{evaluator::eval, parse, Environment};
use std::env;
use std::time::Instant;

static INPUT: &str = "let fibonacci = fn(x) {
if (x == 0) { 0
     } else {
       if (x == 1) {
         return 1;
       } else {
         fibonacci(x - 1) + fibonacci(x - 2);
       }
} };
   fibonacci(n);";

fn main() {
    let n: i64 = env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(25);

    let program = match parse(INPUT) {
        Ok(program) => program,
        Err(errors) => {
            for err in errors.iter() {
                eprintln!("\t{}", err);
            }
            return;
        }
    };

    let env = Environment::new();
    env.set("n", n.into());

    let start = Instant::now();
    let result = eval((&program).into(), &env);
    let duration = start.elapsed();

    match result {
        Ok(result) => println!(
            "engine=eval, n={}, result={}, duration={}",
            n,
            result,
            duration.as_secs_f64(),
        ),
        Err(err) => eprintln!("ERROR: {}", err),
    }
}
