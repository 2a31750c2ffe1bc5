mod args;
mod survey;

use clap::Parser;
use log::{debug, info};

use crate::args::Args;

fn main() {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    } else {
        env_logger::init();
    }
    debug!("args: {:?}", args);

    match survey::run_survey(&args) {
        Ok(_) => info!("Done"),
        Err(e) => {
            eprintln!("An error occured: {}", e);
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
            std::process::exit(1);
        }
    }
}
