/* src/cli/core/src/config/tests.rs */

use super::loader::{find_miniapp_config, load_miniapp_config};
use super::*;

fn write_config(dir: &std::path::Path, content: &str) -> std::path::PathBuf {
  let path = dir.join("miniapp.toml");
  std::fs::write(&path, content).unwrap();
  path
}

#[test]
fn empty_file_uses_defaults() {
  let config: MiniappToml = toml::from_str("").unwrap();
  assert_eq!(config.server.host, "127.0.0.1");
  assert_eq!(config.server.port, 3000);
  assert!(config.forms.is_none());
  assert_eq!(config.log.filter, "info");
  assert!(config.validate().is_ok());
}

#[test]
fn full_config_parses() {
  let config: MiniappToml = toml::from_str(
    r#"
[server]
host = "0.0.0.0"
port = 8080

[forms]
base_url = "https://forms.example.com"
form_id = "customer-dev"
timeout_secs = 5

[storage]
data_dir = "/var/lib/miniapp"
theme_dir = "themes"

[log]
filter = "miniapp_host=debug"
"#,
  )
  .unwrap();
  assert_eq!(config.server.port, 8080);
  let forms = config.forms.as_ref().unwrap();
  assert_eq!(forms.timeout().as_secs(), 5);
  assert_eq!(config.storage.data_dir, std::path::PathBuf::from("/var/lib/miniapp"));
  assert_eq!(config.log.filter, "miniapp_host=debug");
}

#[test]
fn forms_validation_rejects_empty_id_and_zero_timeout() {
  let config: MiniappToml = toml::from_str(
    r#"
[forms]
base_url = "http://localhost:9000"
form_id = ""
"#,
  )
  .unwrap();
  let err = config.validate().unwrap_err().to_string();
  assert!(err.contains("form_id"), "{err}");

  let config: MiniappToml = toml::from_str(
    r#"
[forms]
base_url = "http://localhost:9000"
timeout_secs = 0
"#,
  )
  .unwrap();
  let err = config.validate().unwrap_err().to_string();
  assert!(err.contains("timeout_secs"), "{err}");
}

#[test]
fn port_precedence() {
  let config = MiniappToml::default();
  assert_eq!(config.effective_port(Some(4000), Some("5000")).unwrap(), 4000);
  assert_eq!(config.effective_port(None, Some("5000")).unwrap(), 5000);
  assert_eq!(config.effective_port(None, None).unwrap(), 3000);
  assert!(config.effective_port(None, Some("not-a-port")).is_err());
}

#[test]
fn find_walks_upward() {
  let tmp = tempfile::tempdir().unwrap();
  let nested = tmp.path().join("a/b/c");
  std::fs::create_dir_all(&nested).unwrap();
  write_config(tmp.path(), "");

  let found = find_miniapp_config(&nested).unwrap();
  assert_eq!(found, tmp.path().canonicalize().unwrap().join("miniapp.toml"));
}

#[test]
fn find_reports_missing_file() {
  let tmp = tempfile::tempdir().unwrap();
  let err = find_miniapp_config(tmp.path()).unwrap_err().to_string();
  assert!(err.contains("miniapp.toml not found"), "{err}");
}

#[test]
fn load_resolves_storage_relative_to_config() {
  let tmp = tempfile::tempdir().unwrap();
  let path = write_config(
    tmp.path(),
    r#"
[storage]
data_dir = "state"
theme_dir = "themes"
"#,
  );
  let config = load_miniapp_config(&path).unwrap();
  assert_eq!(config.storage.data_dir, tmp.path().join("state"));
  assert_eq!(config.storage.theme_dir, Some(tmp.path().join("themes")));
}

#[test]
fn load_surfaces_validation_errors() {
  let tmp = tempfile::tempdir().unwrap();
  let path = write_config(tmp.path(), "[forms]\nbase_url = \"\"\n");
  let err = format!("{:#}", load_miniapp_config(&path).unwrap_err());
  assert!(err.contains("forms.base_url must not be empty"), "{err}");
}

#[test]
fn explicit_missing_path_is_an_error() {
  let tmp = tempfile::tempdir().unwrap();
  assert!(resolve_config(Some(tmp.path().join("nope.toml"))).is_err());
}
