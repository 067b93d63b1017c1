use std::{env, io, process};

use slang_lang::slang;

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut stdout = io::stdout();
    let mut slang = slang::new(&mut stdout);

    match args.len() {
        n if n > 2 => {
            println!("Usage: slang [script]");
            process::exit(64);
        },
        2 => slang.run_file(args[1].clone()),
        _ => slang.run_prompt(),
    };
}
