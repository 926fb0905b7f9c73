use scrollcard::{Config, app_core::Scrollcard, logging};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);

    // The card still plays without a log file
    if let Err(e) = logging::init() {
        eprintln!("Logging disabled: {e:#}");
    }

    let config = Config::load(config_path)?;
    Scrollcard::new(config).run()?;

    Ok(())
}
