// render-frames - Main Entry Point
//
// Captures a fixed number of frames from the built-in pattern generator and
// writes them next to the working directory (or wherever render_frames.toml
// points). Takes no arguments.

use render_frames::{FrameRunner, HarnessConfig, Logger, PatternGenerator, CONFIG_FILE};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = HarnessConfig::load_or_default(CONFIG_FILE)?;
    let mut logger = Logger::from_config(&config.logging)?;

    let runner = FrameRunner::new(&config);
    let mut gpu = PatternGenerator::new(*runner.timing());

    let summary = runner.run(&mut gpu, &mut logger)?;

    logger.info(format!(
        "Done: {} frame(s), {} clock cycles",
        summary.frames.len(),
        summary.total_cycles()
    ));

    Ok(())
}
