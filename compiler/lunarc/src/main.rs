//! Lunar command-line driver.

use lunarc::commands::{lex_command, parse_lex_options};

fn main() {
    lunarc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "lex" => match parse_lex_options(&args[2..]) {
            Ok(options) => std::process::exit(lex_command(&options)),
            Err(msg) => {
                eprintln!("error: {msg}");
                eprintln!();
                print_lex_usage();
                std::process::exit(1);
            }
        },
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("lunar {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Lunar lexical front end");
    println!();
    println!("Usage: lunar <command> [options]");
    println!();
    println!("Commands:");
    println!("  lex <file>           Tokenize a file and display tokens");
    println!("  lex -e <chunk>       Tokenize a chunk given on the command line");
    println!("  lex -                Tokenize standard input");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    print_lex_options();
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=lunar_lexer=trace) to see scanner tracing.");
}

fn print_lex_usage() {
    println!("Usage: lunar lex <file> | -e <chunk> | - [options]");
    println!();
    print_lex_options();
}

fn print_lex_options() {
    println!("Lex options:");
    println!("  --compat-global        Scan `global` as an ordinary name");
    println!("  --decimal-point=<c>    Extra radix character for float literals");
    println!("  --source-id-len=<n>    Longest source id shown in messages (default: 59)");
}
