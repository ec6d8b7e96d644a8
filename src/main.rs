use std::path::PathBuf;

use spotify_analyzer::runtime;

#[derive(Debug, PartialEq)]
enum Command {
    Tui { dir: Option<PathBuf> },
    List,
    Print { name: String, dir: PathBuf },
    Help,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    match parse_args(std::env::args().skip(1).collect())? {
        Command::Tui { dir } => runtime::run(dir),
        Command::List => runtime::list_components(),
        Command::Print { name, dir } => runtime::print_report(&name, &dir),
        Command::Help => {
            print_help();
            Ok(())
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<Command, String> {
    let mut dir: Option<PathBuf> = None;
    let mut index = 0;
    while index < args.len() {
        match args[index].as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--list" => return Ok(Command::List),
            "--print" => {
                let (Some(name), Some(dir)) = (args.get(index + 1), args.get(index + 2)) else {
                    return Err("--print requires a component name and a folder".to_string());
                };
                return Ok(Command::Print {
                    name: name.clone(),
                    dir: PathBuf::from(dir),
                });
            }
            other if other.starts_with('-') => return Err(format!("unknown argument {other}")),
            other => {
                if dir.is_some() {
                    return Err(format!("unexpected argument {other}"));
                }
                dir = Some(PathBuf::from(other));
            }
        }
        index += 1;
    }
    Ok(Command::Tui { dir })
}

fn print_help() {
    println!("spotify-analyzer");
    println!("  [DIR]                Start the analyzer, loading DIR");
    println!("  --list               List the available analyzers");
    println!("  --print NAME DIR     Print the text report NAME for DIR");
    println!("  -h, --help           Show this help");
}
