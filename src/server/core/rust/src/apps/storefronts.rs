/* src/server/core/rust/src/apps/storefronts.rs */

use std::sync::Arc;

use serde_json::json;

use super::not_found_view;
use crate::config::{MiniappConfig, PageCtx};
use crate::storefront::{Addon, CatalogItem, ItemId, Storefront};

fn item(id: ItemId, name: &str, category: &str, price: u64, description: &str) -> CatalogItem {
  CatalogItem {
    id,
    name: name.to_string(),
    description: description.to_string(),
    category: category.to_string(),
    price,
    addons: Vec::new(),
  }
}

fn addon(id: u32, name: &str, price: u64) -> Addon {
  Addon { id, name: name.to_string(), price }
}

pub(super) fn menu_catalog() -> Vec<CatalogItem> {
  let mut pelmeni = item(1, "Pelmeni", "mains", 450, "Siberian dumplings, 15 pcs");
  pelmeni.addons = vec![addon(101, "Sour cream", 50), addon(102, "Dill butter", 40)];
  let mut borscht = item(2, "Borscht", "soups", 390, "Beetroot soup with beef");
  borscht.addons = vec![addon(101, "Sour cream", 50), addon(103, "Garlic pampushki", 90)];
  vec![
    pelmeni,
    borscht,
    item(3, "Syrniki", "desserts", 320, "Cottage cheese pancakes"),
    item(4, "Kompot", "drinks", 150, "Berry compote"),
  ]
}

pub(super) fn clothing_catalog() -> Vec<CatalogItem> {
  vec![
    item(11, "Linen shirt", "tops", 3900, "Relaxed fit, natural linen"),
    item(12, "Denim jacket", "outerwear", 7900, "Washed indigo"),
    item(13, "Wool scarf", "accessories", 1900, "Merino blend"),
  ]
}

pub(super) fn books_catalog() -> Vec<CatalogItem> {
  vec![
    item(21, "The Master and Margarita", "fiction", 890, "Mikhail Bulgakov"),
    item(22, "Roadside Picnic", "scifi", 650, "Arkady and Boris Strugatsky"),
    item(23, "The Rust Programming Language", "tech", 2900, "Klabnik and Nichols"),
  ]
}

fn catalog_view(store: &Storefront) -> serde_json::Value {
  let items: Vec<_> = store
    .catalog()
    .iter()
    .map(|item| {
      json!({
        "id": item.id,
        "name": item.name,
        "category": item.category,
        "price": item.price,
        "favorite": store.favorites.is_favorite(item.id),
        "inCart": store.cart.get(item.id).map_or(0, |line| line.quantity),
      })
    })
    .collect();
  json!({ "items": items, "cartCount": store.cart.count(), "theme": store.theme() })
}

fn item_view(store: &Storefront, ctx: &PageCtx<'_>) -> serde_json::Value {
  let found = ctx.params.parse::<ItemId>("itemId").and_then(|id| store.item(id));
  let Some(item) = found else {
    return not_found_view("Item", ctx.params.get("itemId"));
  };
  json!({
    "item": item,
    "favorite": store.favorites.is_favorite(item.id),
    "pending": store.edits.get(item.id),
    "line": store.cart.get(item.id),
  })
}

fn cart_view(store: &Storefront) -> serde_json::Value {
  json!({
    "lines": store.cart.get_all(),
    "total": store.cart.total(),
    "count": store.cart.count(),
  })
}

fn favorites_view(store: &Storefront) -> serde_json::Value {
  let items: Vec<_> =
    store.favorites.get_all().into_iter().filter_map(|id| store.item(id)).cloned().collect();
  json!({ "items": items })
}

fn storefront_config(
  name: &str,
  title: &str,
  icon: &str,
  color: &str,
  store: &Arc<Storefront>,
) -> MiniappConfig {
  let (s1, s2, s3, s4) = (store.clone(), store.clone(), store.clone(), store.clone());
  MiniappConfig::new(name, title)
    .description(format!("{title} storefront with cart and favorites"))
    .icon(icon)
    .color(color)
    .page("", "Catalog", move |_| catalog_view(&s1))
    .page("item/:itemId", "Item", move |ctx| item_view(&s2, ctx))
    .page("cart", "Cart", move |_| cart_view(&s3))
    .page("favorites", "Favorites", move |_| favorites_view(&s4))
}

pub(super) fn menu_config(store: Arc<Storefront>) -> MiniappConfig {
  // past orders are fetched by the client from the orders endpoint
  let source = format!("/api/stores/{}/orders", store.name());
  storefront_config("menu", "Restaurant", "🍽", "#e4572e", &store)
    .page("orders", "Past orders", move |_| {
      json!({ "orders": { "state": "pending" }, "source": source })
    })
}

pub(super) fn clothing_config(store: Arc<Storefront>) -> MiniappConfig {
  storefront_config("clothing_store", "Clothing", "👕", "#4c6ef5", &store)
}

pub(super) fn books_config(store: Arc<Storefront>) -> MiniappConfig {
  storefront_config("books_store", "Books", "📚", "#2b8a3e", &store)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::route::RoutePattern;
  use crate::router::ResolvedPage;

  fn render(config: MiniappConfig, path: &[&str]) -> serde_json::Value {
    let (idx, params) = config
      .pages
      .iter()
      .enumerate()
      .find_map(|(i, p)| Some((i, p.pattern().matches(path)?)))
      .unwrap();
    ResolvedPage { miniapp: Arc::new(config), page_index: idx, params, redirected: false }.render()
  }

  #[test]
  fn catalog_reflects_cart_and_favorites() {
    let store = Arc::new(Storefront::new("menu", menu_catalog()));
    store.cart.add(&store.item(1).unwrap().cart_item());
    store.favorites.toggle(3);
    let view = render(menu_config(store), &[]);
    assert_eq!(view["items"][0]["inCart"], 1);
    assert_eq!(view["items"][2]["favorite"], true);
    assert_eq!(view["cartCount"], 1);
  }

  #[test]
  fn item_page_shows_pending_edit() {
    let store = Arc::new(Storefront::new("menu", menu_catalog()));
    store.edits.set_comment(2, "hot");
    let view = render(menu_config(store), &["item", "2"]);
    assert_eq!(view["item"]["name"], "Borscht");
    assert_eq!(view["pending"]["comment"], "hot");
    assert!(view["line"].is_null());
  }

  #[test]
  fn favorites_page_lists_catalog_items() {
    let store = Arc::new(Storefront::new("books_store", books_catalog()));
    store.favorites.toggle(22);
    let view = render(books_config(store), &["favorites"]);
    assert_eq!(view["items"][0]["name"], "Roadside Picnic");
  }

  #[test]
  fn only_menu_has_orders_page() {
    let menu = menu_config(Arc::new(Storefront::new("menu", menu_catalog())));
    let books = books_config(Arc::new(Storefront::new("books_store", books_catalog())));
    let orders = RoutePattern::parse("orders");
    assert!(menu.pages.iter().any(|p| p.pattern() == &orders));
    assert!(!books.pages.iter().any(|p| p.pattern() == &orders));
  }
}
