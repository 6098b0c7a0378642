mod builder;
mod cli;
mod collections;
mod config;
mod front_matter;
mod liquid;
mod markdown;
mod styles;
mod transform;
mod utils;

fn main() {
    if let Err(e) = cli::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
