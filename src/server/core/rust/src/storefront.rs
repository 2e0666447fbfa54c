/* src/server/core/rust/src/storefront.rs */

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::loadable::Loadable;
use crate::store::{KeyedStore, Subscription};
use crate::theme::{ThemeSettings, load_theme};

pub type ItemId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addon {
  pub id: u32,
  pub name: String,
  /// Minor currency units.
  pub price: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
  pub id: ItemId,
  pub name: String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub category: String,
  pub price: u64,
  #[serde(default)]
  pub addons: Vec<Addon>,
}

impl CatalogItem {
  pub fn cart_item(&self) -> CartItem {
    CartItem { id: self.id, name: self.name.clone(), price: self.price }
  }
}

/// What the cart needs to know about an item when it is added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
  pub id: ItemId,
  #[serde(default)]
  pub name: String,
  pub price: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
  pub id: ItemId,
  pub name: String,
  pub price: u64,
  pub quantity: u32,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub comment: Option<String>,
  pub addons: Vec<u32>,
}

/// Partial update of a cart line. `quantity: Some(0)` removes the line,
/// `comment: Some("")` clears the comment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CartUpdate {
  pub quantity: Option<u32>,
  pub comment: Option<String>,
  pub addons: Option<Vec<u32>>,
}

#[derive(Default)]
pub struct Cart {
  lines: KeyedStore<ItemId, CartLine>,
}

impl Cart {
  pub fn new() -> Self {
    Self::default()
  }

  /// One line per item id: a repeated add bumps the quantity.
  pub fn add(&self, item: &CartItem) {
    self.lines.apply(|lines| {
      match lines.iter_mut().find(|(id, _)| *id == item.id) {
        Some((_, line)) => line.quantity = line.quantity.saturating_add(1),
        None => lines.push((
          item.id,
          CartLine {
            id: item.id,
            name: item.name.clone(),
            price: item.price,
            quantity: 1,
            comment: None,
            addons: Vec::new(),
          },
        )),
      }
      ((), true)
    });
  }

  pub fn remove(&self, id: ItemId) -> bool {
    self.lines.remove(&id).is_some()
  }

  /// Apply `update` to the line for `id`. Unknown ids are a silent no-op (`false`).
  pub fn update(&self, id: ItemId, update: CartUpdate) -> bool {
    if update.quantity == Some(0) {
      return self.remove(id);
    }
    self.lines.update(&id, |line| {
      if let Some(quantity) = update.quantity {
        line.quantity = quantity;
      }
      if let Some(comment) = update.comment {
        line.comment = (!comment.is_empty()).then_some(comment);
      }
      if let Some(addons) = update.addons {
        line.addons = addons;
      }
    })
  }

  pub fn clear(&self) {
    self.lines.clear();
  }

  pub fn get(&self, id: ItemId) -> Option<CartLine> {
    self.lines.get(&id)
  }

  pub fn get_all(&self) -> Vec<CartLine> {
    self.lines.values()
  }

  /// Sum of `price * quantity` over all lines, in minor units. Saturates at `u64::MAX`.
  pub fn total(&self) -> u64 {
    self
      .lines
      .values()
      .iter()
      .map(|l| l.price.saturating_mul(u64::from(l.quantity)))
      .fold(0, u64::saturating_add)
  }

  /// Number of units across all lines.
  pub fn count(&self) -> u64 {
    self.lines.values().iter().map(|l| u64::from(l.quantity)).fold(0, u64::saturating_add)
  }

  pub fn subscribe(&self, callback: impl Fn() + Send + Sync + 'static) -> Subscription {
    self.lines.subscribe(callback)
  }

  pub fn subscriber_count(&self) -> usize {
    self.lines.subscriber_count()
  }
}

#[derive(Default)]
pub struct Favorites {
  flags: KeyedStore<ItemId, bool>,
}

impl Favorites {
  pub fn new() -> Self {
    Self::default()
  }

  /// Flip membership and return the new state. Applying it twice is the identity.
  pub fn toggle(&self, id: ItemId) -> bool {
    self.flags.apply(|flags| match flags.iter().position(|(k, _)| *k == id) {
      Some(idx) => {
        flags.remove(idx);
        (false, true)
      }
      None => {
        flags.push((id, true));
        (true, true)
      }
    })
  }

  pub fn is_favorite(&self, id: ItemId) -> bool {
    self.flags.contains(&id)
  }

  pub fn remove(&self, id: ItemId) -> bool {
    self.flags.remove(&id).is_some()
  }

  pub fn clear(&self) {
    self.flags.clear();
  }

  pub fn get_all(&self) -> Vec<ItemId> {
    self.flags.keys()
  }

  pub fn subscribe(&self, callback: impl Fn() + Send + Sync + 'static) -> Subscription {
    self.flags.subscribe(callback)
  }
}

/// Comment and add-on choice for an item that has not been committed to the cart yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingEdit {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub comment: Option<String>,
  #[serde(default)]
  pub addons: Vec<u32>,
}

#[derive(Default)]
pub struct TempEdits {
  pending: KeyedStore<ItemId, PendingEdit>,
}

impl TempEdits {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn set(&self, id: ItemId, edit: PendingEdit) {
    self.pending.insert(id, edit);
  }

  pub fn set_comment(&self, id: ItemId, comment: impl Into<String>) {
    let comment = comment.into();
    let comment = (!comment.is_empty()).then_some(comment);
    self.pending.apply(|pending| {
      match pending.iter_mut().find(|(k, _)| *k == id) {
        Some((_, edit)) => edit.comment = comment,
        None => pending.push((id, PendingEdit { comment, addons: Vec::new() })),
      }
      ((), true)
    });
  }

  /// Select or deselect an add-on; returns whether it is now selected.
  pub fn toggle_addon(&self, id: ItemId, addon: u32) -> bool {
    self.pending.apply(|pending| {
      let edit = match pending.iter().position(|(k, _)| *k == id) {
        Some(idx) => &mut pending[idx].1,
        None => {
          pending.push((id, PendingEdit::default()));
          let last = pending.len() - 1;
          &mut pending[last].1
        }
      };
      let selected = match edit.addons.iter().position(|a| *a == addon) {
        Some(pos) => {
          edit.addons.remove(pos);
          false
        }
        None => {
          edit.addons.push(addon);
          true
        }
      };
      (selected, true)
    })
  }

  pub fn get(&self, id: ItemId) -> Option<PendingEdit> {
    self.pending.get(&id)
  }

  pub fn discard(&self, id: ItemId) -> Option<PendingEdit> {
    self.pending.remove(&id)
  }

  pub fn get_all(&self) -> Vec<(ItemId, PendingEdit)> {
    self.pending.get_all()
  }

  pub fn subscribe(&self, callback: impl Fn() + Send + Sync + 'static) -> Subscription {
    self.pending.subscribe(callback)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditEntry {
  pub id: ItemId,
  #[serde(flatten)]
  pub edit: PendingEdit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorefrontSnapshot {
  pub store: String,
  pub cart: Vec<CartLine>,
  pub total: u64,
  pub count: u64,
  pub favorites: Vec<ItemId>,
  pub edits: Vec<EditEntry>,
}

/// Subscriptions to all three stores of one storefront.
#[must_use = "dropping a StorefrontSubscription leaves its callbacks registered"]
pub struct StorefrontSubscription(Vec<Subscription>);

impl StorefrontSubscription {
  pub fn unsubscribe(self) {
    for sub in self.0 {
      sub.unsubscribe();
    }
  }
}

/// One storefront mini-app's catalog and its own cart, favorites and edit buffer.
/// Each storefront owns separate instances; nothing is shared between them.
pub struct Storefront {
  name: String,
  catalog: Vec<CatalogItem>,
  theme: Loadable<ThemeSettings>,
  pub cart: Cart,
  pub favorites: Favorites,
  pub edits: TempEdits,
}

impl Storefront {
  pub fn new(name: impl Into<String>, catalog: Vec<CatalogItem>) -> Self {
    Self {
      name: name.into(),
      catalog,
      theme: Loadable::Loaded(ThemeSettings::default()),
      cart: Cart::new(),
      favorites: Favorites::new(),
      edits: TempEdits::new(),
    }
  }

  /// Load this storefront's theme from `dir`, recording failures instead of hiding them.
  pub fn with_theme_dir(mut self, dir: Option<&Path>) -> Self {
    self.theme = load_theme(dir, &self.name);
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn catalog(&self) -> &[CatalogItem] {
    &self.catalog
  }

  pub fn item(&self, id: ItemId) -> Option<&CatalogItem> {
    self.catalog.iter().find(|item| item.id == id)
  }

  pub fn theme(&self) -> &Loadable<ThemeSettings> {
    &self.theme
  }

  /// Move the pending edit for `id` into its cart line, adding the item first if needed.
  /// With nothing pending an existing line is left as it is.
  /// Returns `false` when `id` is not in the catalog.
  pub fn commit_edit(&self, id: ItemId) -> bool {
    let Some(item) = self.item(id) else {
      return false;
    };
    if self.cart.get(id).is_none() {
      self.cart.add(&item.cart_item());
    }
    let Some(edit) = self.edits.discard(id) else {
      return true;
    };
    self.cart.update(
      id,
      CartUpdate {
        quantity: None,
        comment: Some(edit.comment.unwrap_or_default()),
        addons: Some(edit.addons),
      },
    )
  }

  pub fn subscribe(&self, callback: impl Fn() + Send + Sync + 'static) -> StorefrontSubscription {
    let callback: Arc<dyn Fn() + Send + Sync> = Arc::new(callback);
    let subs = [
      self.cart.subscribe({
        let cb = callback.clone();
        move || cb()
      }),
      self.favorites.subscribe({
        let cb = callback.clone();
        move || cb()
      }),
      self.edits.subscribe(move || callback()),
    ];
    StorefrontSubscription(subs.into())
  }

  pub fn snapshot(&self) -> StorefrontSnapshot {
    StorefrontSnapshot {
      store: self.name.clone(),
      cart: self.cart.get_all(),
      total: self.cart.total(),
      count: self.cart.count(),
      favorites: self.favorites.get_all(),
      edits: self.edits.get_all().into_iter().map(|(id, edit)| EditEntry { id, edit }).collect(),
    }
  }
}
