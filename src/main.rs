use std::process::exit;

use mmu_sim::{
    config::Config,
    repl::{Output, REPL},
};

fn print_output(output: Output) -> bool {
    match output {
        Output::Lines(lines) => {
            for line in lines {
                println!("{}", line);
            }
            true
        }
        Output::Exit => false,
    }
}

fn main() {
    env_logger::init();

    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("usage: mmu-sim [fifo|clock] [trace-file]");
            exit(2);
        }
    };
    log::info!("Starting with {} replacement", config.policy);

    let mut repl = REPL::new(config.policy);

    if let Some(trace) = config.trace {
        match repl.load(&trace) {
            Ok(output) => {
                print_output(output);
            }
            Err(err) => {
                eprintln!("cannot read {}: {}", trace.display(), err);
                exit(1);
            }
        }
        return;
    }

    loop {
        if repl.prompt().is_err() {
            break;
        }
        let input = match repl.read_line() {
            Ok(Some(input)) => input,
            Ok(None) => break,
            Err(err) => {
                eprintln!("{}", err);
                break;
            }
        };
        if !print_output(repl.run_line(&input)) {
            break;
        }
    }
}
