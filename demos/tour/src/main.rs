//! # waypoint tour
//!
//! Replays the classic client-side routing scenarios against the waypoint
//! core and prints what a view layer would render:
//!
//! - **url-params**: a prefix `/:name` route shadowing `/invoices/:id`
//! - **not-found**: a trailing catch-all route
//! - **sidebar**: two route tables resolving the same location
//! - **route-config**: nested routes loaded from a TOML or JSON table
//! - **customized-links**: active-link detection
//! - **querystring**: query and fragment parsing
//! - **protected**: a login redirect that remembers where it came from
//! - **prevent-transition**: a guard with a confirmation prompt
//! - **navigate**: push / replace / back on a navigator built from settings
//!
//! ## Running
//!
//! ```bash
//! cargo run --package tour -- url-params /invoices/42
//! cargo run --package tour -- navigate push:/a replace:/b back
//! ```
//!
//! Settings come from `--config` (TOML or JSON) with `WAYPOINT_*` environment
//! overrides applied on top.

mod scenarios;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use waypoint::core::logging::setup_logging;
use waypoint::core::{settings_loader, Settings};

use scenarios::Step;

#[derive(Debug, Parser)]
#[command(name = "tour", about = "Client-side routing scenarios on the waypoint core")]
struct Cli {
    /// Settings file (TOML, or JSON by extension).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve a path where a prefix parameter route shadows a later one.
    UrlParams {
        #[arg(default_value = "/invoices/42")]
        path: String,
    },
    /// Resolve a path against routes ending in a catch-all.
    NotFound {
        #[arg(default_value = "/does-not-exist")]
        path: String,
    },
    /// Resolve a path in both the sidebar and the main route table.
    Sidebar {
        #[arg(default_value = "/bears")]
        path: String,
    },
    /// Load a nested route table and resolve a path in it.
    RouteConfig {
        /// Route table file; a built-in newsletters table is used otherwise.
        #[arg(long)]
        routes: Option<PathBuf>,
        #[arg(default_value = "/newsletters/7")]
        path: String,
    },
    /// Show which navigation links are active for a path.
    CustomizedLinks {
        #[arg(default_value = "/notifications")]
        path: String,
    },
    /// Parse a location with a query string and fragment.
    Querystring {
        #[arg(default_value = "/search?q=rust+router&sort=new#results")]
        href: String,
    },
    /// Visit a page behind a login redirect.
    Protected {
        /// Start signed in.
        #[arg(long)]
        authenticated: bool,
    },
    /// Try to leave a form that guards against transitions.
    PreventTransition {
        /// Answer the prompt with "yes".
        #[arg(long)]
        confirm: bool,
    },
    /// Run push:<href>, replace:<href> and back steps in order.
    Navigate {
        #[arg(required = true)]
        steps: Vec<Step>,
    },
}

fn load_settings(config: Option<&Path>) -> anyhow::Result<Settings> {
    let settings = match config {
        Some(path) if path.extension().is_some_and(|ext| ext == "json") => {
            settings_loader::from_json_file_with_env(path)?
        }
        Some(path) => settings_loader::from_toml_file_with_env(path)?,
        None => settings_loader::from_env(),
    };
    Ok(settings)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;
    setup_logging(&settings);
    tracing::debug!(command = ?cli.command, "starting tour");

    let lines = match cli.command {
        Command::UrlParams { path } => scenarios::url_params(&path)?,
        Command::NotFound { path } => scenarios::not_found(&path)?,
        Command::Sidebar { path } => scenarios::sidebar(&path)?,
        Command::RouteConfig { routes, path } => scenarios::route_config(routes.as_deref(), &path)?,
        Command::CustomizedLinks { path } => scenarios::customized_links(&path)?,
        Command::Querystring { href } => scenarios::querystring(&href),
        Command::Protected { authenticated } => scenarios::protected(authenticated).await?,
        Command::PreventTransition { confirm } => scenarios::prevent_transition(confirm).await?,
        Command::Navigate { steps } => scenarios::navigate(&settings, &steps).await?,
    };

    for line in lines {
        println!("{line}");
    }
    Ok(())
}
