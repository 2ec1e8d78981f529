use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use todoapp_cli::command::HELP;
use todoapp_cli::{render::render, Command, Config, Executor};
use todoapp_core::{Session, TodoClient, ViewModel};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "todoapp=info,todoapp_core=warn".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::parse();
    info!(base_url = %config.base_url, user_id = config.user_id, "starting session");

    let client = TodoClient::new(&config.base_url, config.user_id);
    let mut session = Session::with_error_timeout(client, config.error_timeout());
    let executor = Executor::new();

    let pending = session.load();
    executor.run(&mut session, pending);
    draw(&session)?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading command")?;
        session.tick(Instant::now());

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        if command == Command::Help {
            println!("{HELP}");
            continue;
        }

        let pending = command.dispatch(&mut session);
        executor.run(&mut session, pending);
        session.tick(Instant::now());
        draw(&session)?;
    }

    info!("session ended");
    Ok(())
}

fn draw(session: &Session) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", render(&ViewModel::from_state(session.state())))?;
    stdout.flush()?;
    Ok(())
}
