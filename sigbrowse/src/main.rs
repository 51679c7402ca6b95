use colored::Colorize;
use sigbrowse::commands::command_argument_builder;
use sigbrowse::{handle_run, normalize_legacy_flags};

#[tokio::main]
async fn main() {
    let args = normalize_legacy_flags(std::env::args());
    let matches = command_argument_builder().get_matches_from(args);

    if let Err(e) = handle_run(&matches).await {
        eprintln!("{} {:#}", "[-]".red().bold(), e);
        std::process::exit(1);
    }
}
