/* src/server/core/rust/src/config.rs */

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::errors::HostError;
use crate::route::{RouteParams, RoutePattern};

/// Inputs handed to a page's render-unit.
pub struct PageCtx<'a> {
  pub miniapp: &'a str,
  pub page: &'a MiniappPage,
  pub params: &'a RouteParams,
}

/// Render-unit bound to a page. Returns the page's view model.
pub type RenderFn = Arc<dyn Fn(&PageCtx<'_>) -> serde_json::Value + Send + Sync>;

#[derive(Clone)]
pub struct MiniappPage {
  pub title: String,
  pub component: RenderFn,
  pattern: RoutePattern,
}

impl MiniappPage {
  pub fn new<F>(path: &str, title: impl Into<String>, component: F) -> Self
  where
    F: Fn(&PageCtx<'_>) -> serde_json::Value + Send + Sync + 'static,
  {
    Self { title: title.into(), component: Arc::new(component), pattern: RoutePattern::parse(path) }
  }

  pub fn path(&self) -> &str {
    self.pattern.as_str()
  }

  pub fn pattern(&self) -> &RoutePattern {
    &self.pattern
  }

  pub fn is_root(&self) -> bool {
    self.pattern.is_root()
  }
}

impl fmt::Debug for MiniappPage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MiniappPage").field("path", &self.path()).field("title", &self.title).finish()
  }
}

#[derive(Clone, Debug)]
pub struct MiniappConfig {
  pub name: String,
  pub title: String,
  pub description: String,
  pub icon: Option<String>,
  pub color: Option<String>,
  pub pages: Vec<MiniappPage>,
}

impl MiniappConfig {
  pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      title: title.into(),
      description: String::new(),
      icon: None,
      color: None,
      pages: Vec::new(),
    }
  }

  pub fn description(mut self, description: impl Into<String>) -> Self {
    self.description = description.into();
    self
  }

  pub fn icon(mut self, icon: impl Into<String>) -> Self {
    self.icon = Some(icon.into());
    self
  }

  pub fn color(mut self, color: impl Into<String>) -> Self {
    self.color = Some(color.into());
    self
  }

  pub fn page<F>(mut self, path: &str, title: impl Into<String>, component: F) -> Self
  where
    F: Fn(&PageCtx<'_>) -> serde_json::Value + Send + Sync + 'static,
  {
    self.pages.push(MiniappPage::new(path, title, component));
    self
  }

  /// Index of the page with the empty path, if any.
  pub fn root_index(&self) -> Option<usize> {
    self.pages.iter().position(MiniappPage::is_root)
  }

  /// Check the invariants the permissive registration path does not enforce:
  /// a non-empty name without `/`, unique page paths and a root page.
  pub fn validate(&self) -> Result<(), HostError> {
    if self.name.is_empty() || self.name.contains('/') {
      return Err(HostError::validation(format!("invalid mini-app name {:?}", self.name)));
    }
    let mut seen = HashSet::new();
    for page in &self.pages {
      if !seen.insert(page.pattern().segments()) {
        return Err(HostError::validation(format!(
          "mini-app '{}' declares page path {:?} twice",
          self.name,
          page.path()
        )));
      }
    }
    if self.root_index().is_none() {
      return Err(HostError::validation(format!("mini-app '{}' has no root page", self.name)));
    }
    Ok(())
  }

  pub fn summary(&self) -> MiniappSummary {
    MiniappSummary {
      name: self.name.clone(),
      title: self.title.clone(),
      description: self.description.clone(),
      icon: self.icon.clone(),
      color: self.color.clone(),
      pages: self
        .pages
        .iter()
        .map(|p| PageSummary { path: p.path().to_string(), title: p.title.clone() })
        .collect(),
    }
  }
}

/// Serializable view of a config, used for home listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MiniappSummary {
  pub name: String,
  pub title: String,
  pub description: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub icon: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub color: Option<String>,
  pub pages: Vec<PageSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSummary {
  pub path: String,
  pub title: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn blank(_: &PageCtx<'_>) -> serde_json::Value {
    serde_json::Value::Null
  }

  #[test]
  fn builder_keeps_page_order() {
    let config = MiniappConfig::new("menu", "Menu")
      .icon("🍽")
      .page("", "Home", blank)
      .page("item/:itemId", "Item", blank)
      .page("cart", "Cart", blank);
    let paths: Vec<_> = config.pages.iter().map(MiniappPage::path).collect();
    assert_eq!(paths, vec!["", "item/:itemId", "cart"]);
    assert_eq!(config.icon.as_deref(), Some("🍽"));
    assert_eq!(config.root_index(), Some(0));
  }

  #[test]
  fn root_need_not_be_first() {
    let config = MiniappConfig::new("x", "X").page("about", "About", blank).page("", "Home", blank);
    assert_eq!(config.root_index(), Some(1));
  }

  #[test]
  fn validate_accepts_well_formed() {
    let config = MiniappConfig::new("calc", "Calc").page("", "Home", blank);
    assert!(config.validate().is_ok());
  }

  #[test]
  fn validate_rejects_duplicate_paths() {
    let config = MiniappConfig::new("x", "X").page("", "A", blank).page("/", "B", blank);
    let err = config.validate().unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
    assert!(err.message().contains("twice"));
  }

  #[test]
  fn validate_rejects_missing_root() {
    let config = MiniappConfig::new("x", "X").page("cart", "Cart", blank);
    assert!(config.validate().unwrap_err().message().contains("no root page"));
  }

  #[test]
  fn validate_rejects_bad_names() {
    assert!(MiniappConfig::new("", "X").page("", "A", blank).validate().is_err());
    assert!(MiniappConfig::new("a/b", "X").page("", "A", blank).validate().is_err());
  }

  #[test]
  fn summary_serializes_without_empty_metadata() {
    let config = MiniappConfig::new("calc", "Calculator").page("", "Home", blank);
    let json = serde_json::to_value(config.summary()).unwrap();
    assert_eq!(
      json,
      serde_json::json!({
        "name": "calc",
        "title": "Calculator",
        "description": "",
        "pages": [{"path": "", "title": "Home"}]
      })
    );
  }
}
