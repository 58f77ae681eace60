use clap::Parser;
use color_eyre::Result;
use spectrum_logger::app::App;
use spectrum_logger::cli::CliArgs;
use spectrum_logger::config::init_app_config;
use spectrum_logger::store::RecordStore;
use spectrum_logger::{event, terminal};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = init_app_config()?;
    let mut app = App::new(RecordStore::open(&config));

    // Headless mode: explicit flag, or stdout is not a terminal
    if args.headless || !is_terminal() {
        return event::run_headless(&mut app, args.json).await;
    }

    app.store.hydrate().await;

    // Setup terminal
    let mut terminal = terminal::setup()?;

    // Run the application
    let result = event::run(&mut terminal, &mut app).await;

    // Restore terminal
    terminal::cleanup(true, true);

    result
}

fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
