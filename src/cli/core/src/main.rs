/* src/cli/core/src/main.rs */

mod config;
mod host;
mod logging;
mod ui;

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use miniapp_host::Resolution;
use miniapp_host_axum::IntoAxumRouter;

use config::{MiniappToml, resolve_config};
use ui::{DIM, RESET};

#[derive(Parser)]
#[command(name = "miniapp", about = "Mini-app host")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the home screen and every built-in mini-app over HTTP
  Serve {
    /// Path to miniapp.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Port to listen on (overrides PORT and [server].port)
    #[arg(short, long)]
    port: Option<u16>,
  },
  /// List registered mini-apps and their pages
  List {
    /// Path to miniapp.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
  },
  /// Show which page a path resolves to and print its view
  Resolve {
    /// Location path, e.g. /miniapp/menu/item/1
    path: String,
    /// Path to miniapp.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
  },
}

fn load(explicit: Option<PathBuf>) -> Result<MiniappToml> {
  let (path, config) = resolve_config(explicit)?;
  logging::init_tracing(&config.log.filter);
  match path {
    Some(path) => tracing::debug!(config = %path.display(), "loaded configuration"),
    None => tracing::debug!("no miniapp.toml found, using defaults"),
  }
  Ok(config)
}

async fn serve(config: MiniappToml, port: Option<u16>) -> Result<()> {
  let env_port = std::env::var("PORT").ok();
  let port = config.effective_port(port, env_port.as_deref())?;
  let addr = format!("{}:{port}", config.server.host);

  ui::banner("serve");
  let host = host::build_host(&config)?;
  ui::arrow(&format!("http://{addr}"));
  ui::blank();
  host.serve(&addr).await.map_err(|e| anyhow::anyhow!("server error: {e}"))
}

fn list(config: &MiniappToml) -> Result<()> {
  let parts = host::build_host(config)?.into_parts();
  ui::banner("list");
  for miniapp in parts.registry().get_all() {
    ui::ok(&ui::miniapp_heading(&miniapp));
    for page in &miniapp.pages {
      ui::detail(&ui::page_line(page));
    }
  }
  ui::blank();
  Ok(())
}

fn resolve(config: &MiniappToml, path: &str) -> Result<()> {
  let parts = host::build_host(config)?.into_parts();
  match parts.router.resolve(path) {
    Resolution::Home => {
      ui::ok(&format!("{path} -> home {DIM}({} mini-apps){RESET}", parts.registry().len()));
    }
    Resolution::MiniappNotFound { name } => {
      ui::fail(&format!("{path} -> mini-app '{name}' not found"));
      bail!("unresolved path {path}");
    }
    Resolution::Page(page) => {
      if page.redirected {
        ui::warn(&format!("{path} matched no page, redirected to {}", page.canonical_path()));
      }
      let current = page.page();
      ui::ok(&format!("{} -> {} / {}", page.canonical_path(), page.miniapp.name, current.title));
      for (key, value) in page.params.iter() {
        ui::detail(&format!("{key} = {value}"));
      }
      ui::view(&page.render());
    }
  }
  Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  match cli.command {
    Command::Serve { config, port } => {
      let config = load(config)?;
      serve(config, port).await?;
    }
    Command::List { config } => {
      let config = load(config)?;
      list(&config)?;
    }
    Command::Resolve { path, config } => {
      let config = load(config)?;
      resolve(&config, &path)?;
    }
  }
  Ok(())
}
