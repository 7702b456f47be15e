//! Command-line pieces shared by the workspace binaries.

use std::path::PathBuf;

use clap::builder::{
	Styles,
	styling::{AnsiColor, Effects},
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, clap::Args)]
pub struct ConfigArgs {
	/// TOML configuration file.
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Overrides `service.log_level`, e.g. `scholar_service=debug,info`.
	#[arg(long, value_name = "FILTER")]
	pub log_level: Option<String>,
}
impl ConfigArgs {
	/// The log filter to install, preferring the command line over the config file.
	pub fn log_filter<'a>(&'a self, configured: &'a str) -> &'a str {
		match self.log_level.as_deref().map(str::trim) {
			Some(level) if !level.is_empty() => level,
			_ => configured,
		}
	}
}

pub fn styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Cyan.on_default() | Effects::BOLD)
		.usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
		.literal(AnsiColor::Blue.on_default() | Effects::BOLD)
		.placeholder(AnsiColor::Green.on_default())
}
