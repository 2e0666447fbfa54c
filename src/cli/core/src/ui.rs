/* src/cli/core/src/ui.rs */

use miniapp_host::{MiniappConfig, MiniappPage};

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn ok(msg: &str) {
  println!("  {GREEN}\u{2713}{RESET} {msg}");
}

pub fn fail(msg: &str) {
  println!("  {RED}\u{2717}{RESET} {msg}");
}

pub fn warn(msg: &str) {
  println!("  {YELLOW}!{RESET} {msg}");
}

pub fn arrow(msg: &str) {
  println!("  {GREEN}\u{2192}{RESET} {msg}");
}

pub fn detail(msg: &str) {
  println!("        {msg}");
}

pub fn banner(cmd: &str) {
  println!();
  println!("  {BOLD}miniapp{RESET} {cmd} {DIM}v{VERSION}{RESET}");
  println!();
}

pub fn blank() {
  println!();
}

/// Path relative to the mini-app root, as typed after `/miniapp/<name>`.
pub fn page_path(page: &MiniappPage) -> String {
  if page.is_root() { "/".to_string() } else { format!("/{}", page.path()) }
}

pub fn miniapp_heading(miniapp: &MiniappConfig) -> String {
  let icon = miniapp.icon.as_deref().unwrap_or(" ");
  format!("{icon} {BOLD}{}{RESET} {DIM}({}){RESET}", miniapp.name, miniapp.title)
}

pub fn page_line(page: &MiniappPage) -> String {
  format!("{CYAN}{:<20}{RESET} {DIM}{}{RESET}", page_path(page), page.title)
}

/// Pretty-printed view model, one detail line per JSON line.
pub fn view(value: &serde_json::Value) {
  let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
  for line in pretty.lines() {
    detail(line);
  }
}
