mod app;
mod screens;
pub use app::App;

use prodcomp_experiment::ExperimentConfig;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // participant screens go to stdout, diagnostics to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = ExperimentConfig::from_env();
    let mut app = App::new(&config)?;
    app.run()?;

    Ok(())
}
