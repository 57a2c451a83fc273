use anyhow::{Context, Result};
use genbot::config::AppConfig;
use genbot::format::format;
use genbot::messages::Message;
use genbot::session::SessionStore;
use genbot::ui::{render_segments, ChatState};
use std::io::{Read, Write};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "genbot=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::default();
    config.validate()?;

    let session = SessionStore::new(&config.session_path).load_or_default();
    match &session.current_user {
        Some(user) => info!("Signed in as {}", user.display_name),
        None => info!("No saved session"),
    }

    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .context("failed to read message from stdin")?;

    println!("{}", render_segments(&format(&content)));

    // Replay the message the way the chat view types it out
    let mut chat = ChatState::new(config.reveal.clone());
    chat.reveal_bot_reply(Message::bot(content))?;

    let mut shown = 0;
    let mut stdout = std::io::stdout();
    while chat.is_typing() {
        tokio::time::sleep(config.reveal.word_delay / 2).await;
        chat.poll_events();

        let text = &chat.typing.text;
        if text.len() > shown {
            write!(stdout, "{}", &text[shown..])?;
            stdout.flush()?;
            shown = text.len();
        }
    }
    writeln!(stdout)?;

    info!("Reveal finished, {} message(s) stored", chat.messages.len());
    Ok(())
}
