use clap::Parser;
use boardview::cli::commands::Cli;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = boardview::tui::run(&cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
