use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use keycode_registry::{check, config, keycodes};

#[derive(Parser, Debug)]
#[command(name = "keycodes", version, about = "Query browser keyboard event codes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the code for a key name
    Lookup {
        name: String,
        /// Accept aliases and any casing ("return", "Caps_Lock")
        #[arg(long)]
        lenient: bool,
    },
    /// Print the key name for a code
    Name { code: u32 },
    /// Print every known key
    List,
    /// Load and validate a TOML bindings file
    Check { path: PathBuf },
}

fn fail(message: String) -> ! {
    log::debug!("Exiting with error: {}", message);
    eprintln!("{}", message);
    process::exit(1);
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Parsed arguments: {:?}", cli);

    match cli.command {
        Command::Lookup { name, lenient } => {
            let result = if lenient {
                keycodes::resolve(&name)
            } else {
                keycodes::lookup(&name)
            };
            match result {
                Ok(code) => println!("{}", code),
                Err(e) => fail(e.to_string()),
            }
        }
        Command::Name { code } => match keycodes::name_of(code) {
            Some(name) => println!("{}", name),
            None => fail(format!("No named key for keycode {}", code)),
        },
        Command::List => {
            for (name, code) in keycodes::registry().iter() {
                println!("{:<10} {}", name, code);
            }
        }
        Command::Check { path } => {
            let bindings = config::load_and_process_config(&path)
                .unwrap_or_else(|e| fail(e.to_string()));
            if let Err(e) = check::validate_config(&bindings) {
                fail(e.to_string());
            }
            check::print_config_for_check(&bindings);
            println!("\nBindings file '{}' is valid.", path.display());
        }
    }
}
