mod terminal;

use clap::Parser;
use cubeturn::config::Args;
use log::info;
use std::time::Duration;

/// Main function
fn main() -> anyhow::Result<()> {
    // The terminal is the display, so keep the default quiet; redirect stderr
    // to a file when raising RUST_LOG.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_micros()
        .init();

    let args = Args::parse();
    let config = args.to_config();
    info!("starting {} {} with {:?}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), config);

    let mut app = terminal::App::new(config, Duration::from_millis(args.frame_ms))?;
    app.run()
}
