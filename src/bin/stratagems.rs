// Copyright © 2016, Peter Atashian
use stratagems::{Config, Wiki};
use tracing::error;

fn main() {
    tracing_subscriber::fmt().with_target(false).init();
    let wiki = match Wiki::new(Config::default()) {
        Ok(wiki) => wiki,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = stratagems::run(&wiki) {
        error!("{}", e);
        std::process::exit(1);
    }
}
