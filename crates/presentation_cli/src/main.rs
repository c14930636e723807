//! Wayfinder CLI
//!
//! Asks a running server for directions, or plans a route in-process
//! against the configured providers.

#![allow(clippy::print_stdout)]

use anyhow::Context;
use clap::Parser;
use domain::RouteResult;
use infrastructure::{AppConfig, build_directions_service};
use presentation_cli::{Cli, Commands, endpoint_url, log_filter_from_verbosity, render_error, render_route};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = log_filter_from_verbosity(cli.verbose);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Route {
            source,
            destination,
            url,
            json,
        } => {
            let client = reqwest::Client::new();
            let resp = client
                .post(endpoint_url(&url, "/v1/directions"))
                .json(&json!({ "source": source, "destination": destination }))
                .send()
                .await
                .with_context(|| format!("Failed to reach server at {url}"))?;

            let status = resp.status();
            let body = resp
                .json::<serde_json::Value>()
                .await
                .unwrap_or(serde_json::Value::Null);

            if !status.is_success() {
                println!("❌ {}", render_error(status.as_u16(), &body));
                std::process::exit(1);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                let route: RouteResult = serde_json::from_value(body)
                    .context("Server returned an unexpected route payload")?;
                println!("{}", render_route(&route));
            }
        },

        Commands::Plan {
            source,
            destination,
            json,
        } => {
            let config = AppConfig::load().context("Failed to load configuration")?;
            let service = build_directions_service(&config)
                .context("Failed to build provider clients")?;

            match service.plan(&source, &destination).await {
                Ok(route) if json => println!("{}", serde_json::to_string_pretty(&route)?),
                Ok(route) => println!("{}", render_route(&route)),
                Err(e) => {
                    println!("❌ {} ({})", e.user_message(), e.code());
                    std::process::exit(1);
                },
            }
        },

        Commands::Health { url } => {
            let client = reqwest::Client::new();
            match client.get(endpoint_url(&url, "/health")).send().await {
                Ok(resp) if resp.status().is_success() => {
                    println!("✅ Healthy");
                },
                Ok(resp) => {
                    println!("❌ Unhealthy: HTTP {}", resp.status());
                    std::process::exit(1);
                },
                Err(e) => {
                    println!("❌ Unhealthy: {e}");
                    std::process::exit(1);
                },
            }
        },
    }

    Ok(())
}
