//! CLI entry point for the greedy photomosaic builder

use clap::Parser;
use greedymosaic::io::cli::{Cli, MosaicProcessor};
use greedymosaic::io::error::configuration_error;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

fn main() -> greedymosaic::Result<()> {
    let cli = Cli::parse();
    let config = ConfigBuilder::new().set_time_level(log::LevelFilter::Off).build();
    TermLogger::init(
        cli.log_level(),
        config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .map_err(|e| configuration_error(&format!("cannot install logger: {e}")))?;

    let mut processor = MosaicProcessor::new(cli);
    let output_path = processor.process()?;
    log::info!("Mosaic written to {}", output_path.display());
    Ok(())
}
