use clap::Parser;
use logfeeder_config::cli::{ConfigCli, ConfigCliRunner};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = ConfigCliRunner::run(ConfigCli::parse()) {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
