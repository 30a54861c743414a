//! spin3d terminal demo - a box or a polyline spinning forever
//!
//! Controls:
//!   - Q/ESC/Ctrl-C: Quit
//!
//! Usage: spin3d-terminal [--demo box|line] [--fps N] [--frames N]

use anyhow::Result;
use clap::Parser;
use spin3d_terminal::cli::Cli;
use spin3d_terminal::logging::{init_logging, LoggingConfig};
use spin3d_terminal::{FixedRate, TerminalApp};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig {
        env_filter: cli.log.clone(),
        ..LoggingConfig::default()
    });

    let mut app = TerminalApp::new(cli.demo)?;
    let mut scheduler = FixedRate::new(cli.fps);
    let ticks = app.run(&mut scheduler, cli.frames)?;

    log::info!("{} demo stopped after {} frames", app.demo(), ticks);
    Ok(())
}
