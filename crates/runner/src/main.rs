use anyhow::{Context, bail};
use marquee_client::{ChannelState, TicketingClient};
use marquee_runner::{Command, StderrNotifier, USAGE, load_client_config, render_events, render_outcome};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs to stderr; stdout carries the rendered screens
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("marquee=info".parse()?))
        .init();

    let command = match Command::parse(std::env::args().skip(1)) {
        Ok(Command::Help) => {
            println!("{USAGE}");
            return Ok(());
        }
        Ok(command) => command,
        Err(e) => bail!("{e}\n{USAGE}"),
    };

    let config = load_client_config().context("failed to load client config")?;
    info!(
        "REST origin {}, matching engine {}",
        config.rest.base_url, config.matching_engine.ws_url
    );

    let client = TicketingClient::new(config.to_client_config(), Arc::new(StderrNotifier))
        .context("failed to build HTTP client")?;

    match command {
        Command::Events => {
            // Dropping the cycle on Ctrl-C cancels the in-flight fetches
            let cycle = client.spawn_fetch();
            tokio::select! {
                result = cycle.join() => match result {
                    Ok(Some(snapshots)) => print!("{}", render_events(&Ok(snapshots))),
                    Ok(None) => info!("Fetch cycle cancelled"),
                    Err(e) => print!("{}", render_events(&Err(e))),
                },
                _ = tokio::signal::ctrl_c() => info!("Interrupted, cancelling fetch cycle"),
            }
        }
        Command::Buy {
            event_id,
            qty,
            wait: false,
        } => {
            let state = client.buy_ticket_with_qty(event_id, qty)?.await?;
            if state == ChannelState::Error {
                bail!("purchase intent for event {event_id} was not delivered");
            }
            println!("Purchase request sent for event {event_id}");
        }
        Command::Buy {
            event_id,
            qty,
            wait: true,
        } => {
            let outcome = client.purchase(event_id, qty).await?;
            println!("{}", render_outcome(&outcome));
        }
        Command::Help => println!("{USAGE}"),
    }

    Ok(())
}
