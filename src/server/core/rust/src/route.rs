/* src/server/core/rust/src/route.rs */

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
  Literal(String),
  Param(String),
}

/// A page path such as `item/:itemId`, parsed once into segments.
/// The empty pattern matches only the empty remainder (the mini-app root).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
  source: String,
  segments: Vec<Segment>,
}

impl RoutePattern {
  pub fn parse(source: &str) -> Self {
    let segments = split_segments(source)
      .map(|seg| match seg.strip_prefix(':') {
        Some(name) if !name.is_empty() => Segment::Param(name.to_string()),
        _ => Segment::Literal(seg.to_string()),
      })
      .collect();
    Self { source: source.to_string(), segments }
  }

  pub fn as_str(&self) -> &str {
    &self.source
  }

  pub fn segments(&self) -> &[Segment] {
    &self.segments
  }

  pub fn is_root(&self) -> bool {
    self.segments.is_empty()
  }

  /// Match already-split path segments, binding every `:name` segment.
  pub fn matches<S: AsRef<str>>(&self, path: &[S]) -> Option<RouteParams> {
    if path.len() != self.segments.len() {
      return None;
    }
    let mut params = RouteParams::default();
    for (segment, actual) in self.segments.iter().zip(path) {
      let actual = actual.as_ref();
      match segment {
        Segment::Literal(lit) if lit == actual => {}
        Segment::Literal(_) => return None,
        Segment::Param(name) => params.insert(name.clone(), actual.to_string()),
      }
    }
    Some(params)
  }

  /// Substitute params back into the pattern, e.g. `item/:itemId` + {itemId: 7} -> `item/7`.
  /// Missing params leave the `:name` segment in place.
  pub fn fill(&self, params: &RouteParams) -> String {
    self
      .segments
      .iter()
      .map(|seg| match seg {
        Segment::Literal(lit) => urlencoding::encode(lit).into_owned(),
        Segment::Param(name) => match params.get(name) {
          Some(value) => urlencoding::encode(value).into_owned(),
          None => format!(":{name}"),
        },
      })
      .collect::<Vec<_>>()
      .join("/")
  }
}

impl fmt::Display for RoutePattern {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.source)
  }
}

/// Split a path on `/`, dropping empty segments so `a//b/` and `a/b` agree.
pub fn split_segments(path: &str) -> impl Iterator<Item = &str> {
  path.split('/').filter(|s| !s.is_empty())
}

/// Named parameters bound by a [`RoutePattern`] match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RouteParams(BTreeMap<String, String>);

impl RouteParams {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
    self.0.insert(name.into(), value.into());
  }

  pub fn get(&self, name: &str) -> Option<&str> {
    self.0.get(name).map(String::as_str)
  }

  /// Typed accessor: `None` when absent or unparseable.
  pub fn parse<T: FromStr>(&self, name: &str) -> Option<T> {
    self.get(name)?.parse().ok()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }
}
