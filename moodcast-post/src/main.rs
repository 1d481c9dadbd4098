//! moodcast-post - generate one post about AI and publish it
//!
//! Takes no arguments. Meant to be invoked by cron or a similar scheduler,
//! once per desired post.

use libmoodcast::{logging, Bot, Config, Result};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // A missing .env file is fine; the real environment may carry everything
    let _ = dotenvy::dotenv();

    logging::init_default();

    // Only startup failures change the exit code
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run() -> Result<()> {
    let config = Config::from_env()?;
    let bot = Bot::from_config(&config).await?;

    bot.run().await;
    Ok(())
}
