pub mod routes;
pub mod state;

use std::net::SocketAddr;

use clap::Parser;
use color_eyre::eyre;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(
	version = scholar_cli::VERSION,
	rename_all = "kebab",
	styles = scholar_cli::styles(),
)]
pub struct Args {
	#[command(flatten)]
	pub opts: scholar_cli::ConfigArgs,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = scholar_config::load(&args.opts.config)?;

	init_tracing(args.opts.log_filter(&config.service.log_level))?;

	let http_addr: SocketAddr = config.service.http_bind.parse()?;

	if config.security.bind_localhost_only && !http_addr.ip().is_loopback() {
		return Err(eyre::eyre!(
			"http_bind must be a loopback address when bind_localhost_only is true."
		));
	}

	let state = AppState::new(config).await?;
	let app = routes::router(state);
	let listener = TcpListener::bind(http_addr).await?;

	tracing::info!(%http_addr, version = scholar_cli::VERSION, "HTTP server listening.");

	axum::serve(listener, app).await?;

	Ok(())
}

fn init_tracing(log_level: &str) -> color_eyre::Result<()> {
	tracing_subscriber::fmt().with_env_filter(log_filter(log_level)?).init();

	Ok(())
}

fn log_filter(log_level: &str) -> color_eyre::Result<EnvFilter> {
	EnvFilter::try_new(log_level)
		.map_err(|err| eyre::eyre!("Invalid log filter {log_level:?}: {err}."))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn invalid_log_filter_is_an_error() {
		let err = log_filter("scholar_service=verbose").expect_err("Unknown level must fail.");

		assert!(err.to_string().starts_with("Invalid log filter"), "{err}");
	}

	#[test]
	fn valid_log_filter_parses() {
		assert!(log_filter("scholar_service=debug,info").is_ok());
	}
}
