use clap::Parser;

mod commands;
mod handlers;
mod output;

use commands::Cli;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = handlers::handle_command(cli) {
        output::print_error(&err.to_string());
        std::process::exit(1);
    }
}
