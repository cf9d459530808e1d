use clap::Parser;
use img2gcode::cli::{run, Cli};
use img2gcode::init_logging;

fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::debug!("img2gcode {} (built {})", img2gcode::VERSION, img2gcode::BUILD_DATE);

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    run(cli, &mut stdout.lock())
}
