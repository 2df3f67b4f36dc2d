use gridpaint_engine::logging::{init_logging, LoggingConfig};
use gridpaint_engine::paint::Color;
use gridpaint_grid::{GridApplication, GridConfig};

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    // `--fill` starts with every cell painted red, uploaded in one batch.
    let mut config = GridConfig::default();
    if std::env::args().skip(1).any(|a| a == "--fill") {
        config = config.with_initial_fill(Color::RED);
    }

    let result = GridApplication::new(config).title("gridpaint").run();
    if let Err(e) = &result {
        log::error!("gridpaint exited with error: {e:#}");
    }
    result
}
