use chatpal::{app::App, config, ui};
use dotenv::dotenv;
use env_logger::Env;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();

    config::initialize_config()?;
    let config = config::get_config();

    // RUST_LOG still wins over the configured level.
    env_logger::Builder::from_env(Env::default().default_filter_or(config.log_level.as_str()))
        .init();

    let (app, events_rx) = App::new(&config);
    app.schedule_welcome();

    ui::run_ui(app, events_rx).await
}
