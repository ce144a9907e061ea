//! hbnb console entry point.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use hbnb_runtime::{Config, Console, Repl, logging};
use tracing::info;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("hbnb {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    logging::init(&config.log_filter);

    // A backing file that cannot be understood aborts startup.
    let console = Console::open(&config.file).map_err(|e| match &e.context {
        Some(context) => format!("{e} ({context})"),
        None => e.to_string(),
    })?;
    info!(
        file = %config.file.display(),
        objects = console.registry().len(),
        "session started"
    );

    let mut repl = Repl::new(console)?;

    for script in &config.scripts {
        if !repl.run_file(script)? {
            return Ok(());
        }
    }

    if config.batch {
        return Ok(());
    }

    if !config.banner || !config.scripts.is_empty() || !io::stdin().is_terminal() {
        repl = repl.without_banner();
    }

    repl.run()?;
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mhbnb\x1b[0m - Command interpreter for a file-backed object store

\x1b[1mUSAGE:\x1b[0m
    hbnb [OPTIONS] [SCRIPTS...]

\x1b[1mARGUMENTS:\x1b[0m
    [SCRIPTS...]    Files whose lines run as commands before the prompt

\x1b[1mOPTIONS:\x1b[0m
    -h, --help         Print help information
    -V, --version      Print version information
    -f, --file PATH    Backing file (default: file.json, env: HBNB_FILE)
    -b, --batch        Run scripts and exit (no prompt)
    -v, --verbose      Log debug output to stderr (env: HBNB_LOG)
    --no-banner        Do not print the welcome banner

\x1b[1mEXAMPLES:\x1b[0m
    hbnb                         Start the interactive console
    hbnb -f test.json            Use test.json as the store
    hbnb -b seed.txt             Run seed.txt and exit
    echo 'all User' | hbnb       Run commands from a pipe

\x1b[1mCOMMANDS:\x1b[0m
    create <Class>                     Create an instance and print its id
    show <Class> <id>                  Print an instance
    destroy <Class> <id>               Delete an instance
    all [<Class>]                      Print all instances
    update <Class> <id> <name> <value> Set one attribute
    update <Class> <id> {{<map>}}        Set several attributes
    count <Class>                      Count instances
    <Class>.<command>(<args>)          Dotted form of the above
    help [<command>], quit, Ctrl+D"
    );
}
