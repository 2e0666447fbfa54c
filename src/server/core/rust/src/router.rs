/* src/server/core/rust/src/router.rs */

use std::sync::Arc;

use crate::config::{MiniappConfig, MiniappPage, PageCtx};
use crate::registry::Registry;
use crate::route::{RouteParams, split_segments};

/// Prefix segment that hands the rest of the path to a mini-app.
pub const MINIAPP_PREFIX: &str = "miniapp";

/// Outer-level reading of a path, before any registry lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
  Home,
  Miniapp { name: String, rest: Vec<String> },
}

impl Location {
  /// `/miniapp/<name>/<rest..>` selects a mini-app; every other path is home.
  /// Query string and fragment are ignored, segments are percent-decoded.
  pub fn parse(path: &str) -> Self {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let mut segments = split_segments(path).map(decode_segment);
    match (segments.next(), segments.next()) {
      (Some(prefix), Some(name)) if prefix == MINIAPP_PREFIX => {
        Self::Miniapp { name, rest: segments.collect() }
      }
      _ => Self::Home,
    }
  }
}

fn decode_segment(raw: &str) -> String {
  urlencoding::decode(raw).map(|s| s.into_owned()).unwrap_or_else(|_| raw.to_string())
}

/// Split an already-decoded wildcard capture into route segments.
pub fn split_rest(rest: &str) -> Vec<String> {
  split_segments(rest).map(str::to_string).collect()
}

pub fn miniapp_path(name: &str) -> String {
  format!("/{MINIAPP_PREFIX}/{}", urlencoding::encode(name))
}

/// Per-mini-app page matcher built from `config.pages`.
pub struct InnerRouter<'a> {
  pages: &'a [MiniappPage],
}

impl<'a> InnerRouter<'a> {
  pub fn new(config: &'a MiniappConfig) -> Self {
    Self { pages: &config.pages }
  }

  /// First page (in declaration order) whose pattern matches `rest`.
  pub fn matching<S: AsRef<str>>(&self, rest: &[S]) -> Option<(usize, RouteParams)> {
    self.pages.iter().enumerate().find_map(|(idx, page)| Some((idx, page.pattern().matches(rest)?)))
  }

  /// Redirect target on no match: the `""` page, else the first page.
  pub fn fallback(&self) -> Option<usize> {
    let first = (!self.pages.is_empty()).then_some(0);
    self.pages.iter().position(MiniappPage::is_root).or(first)
  }

  pub fn resolve<S: AsRef<str>>(&self, rest: &[S]) -> Option<(usize, RouteParams, bool)> {
    if let Some((idx, params)) = self.matching(rest) {
      return Some((idx, params, false));
    }
    self.fallback().map(|idx| (idx, RouteParams::new(), true))
  }
}

#[derive(Debug, Clone)]
pub struct ResolvedPage {
  pub miniapp: Arc<MiniappConfig>,
  pub page_index: usize,
  pub params: RouteParams,
  /// The requested sub-path matched nothing and the root page was substituted.
  pub redirected: bool,
}

impl ResolvedPage {
  pub fn page(&self) -> &MiniappPage {
    &self.miniapp.pages[self.page_index]
  }

  /// Path that reaches this page directly, e.g. `/miniapp/menu/item/7`.
  pub fn canonical_path(&self) -> String {
    let base = miniapp_path(&self.miniapp.name);
    let suffix = self.page().pattern().fill(&self.params);
    if suffix.is_empty() { base } else { format!("{base}/{suffix}") }
  }

  pub fn render(&self) -> serde_json::Value {
    let page = self.page();
    let ctx = PageCtx { miniapp: &self.miniapp.name, page, params: &self.params };
    (page.component)(&ctx)
  }
}

#[derive(Debug, Clone)]
pub enum Resolution {
  Home,
  /// Named mini-app is not registered (or declares no pages). Rendered inline, never redirected.
  MiniappNotFound { name: String },
  Page(ResolvedPage),
}

/// Outer router: `/` and unknown paths go home, `/miniapp/<name>/*` is delegated.
#[derive(Clone)]
pub struct Router {
  registry: Arc<Registry>,
}

impl Router {
  pub fn new(registry: Arc<Registry>) -> Self {
    Self { registry }
  }

  pub fn registry(&self) -> &Arc<Registry> {
    &self.registry
  }

  pub fn resolve(&self, path: &str) -> Resolution {
    match Location::parse(path) {
      Location::Home => Resolution::Home,
      Location::Miniapp { name, rest } => self.resolve_miniapp(&name, &rest),
    }
  }

  pub fn resolve_miniapp<S: AsRef<str>>(&self, name: &str, rest: &[S]) -> Resolution {
    let Some(miniapp) = self.registry.get(name) else {
      tracing::debug!(miniapp = %name, "navigation to unregistered mini-app");
      return Resolution::MiniappNotFound { name: name.to_string() };
    };
    let Some((page_index, params, redirected)) = InnerRouter::new(&miniapp).resolve(rest) else {
      tracing::warn!(miniapp = %name, "mini-app declares no pages");
      return Resolution::MiniappNotFound { name: name.to_string() };
    };
    if redirected {
      tracing::debug!(miniapp = %name, "unmatched sub-path, redirecting to root page");
    }
    Resolution::Page(ResolvedPage { miniapp, page_index, params, redirected })
  }
}
