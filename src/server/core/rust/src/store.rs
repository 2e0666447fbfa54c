/* src/server/core/rust/src/store.rs */

use std::sync::{Arc, Mutex, MutexGuard, Weak};

type Callback = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Subscribers {
  next_id: u64,
  list: Vec<(u64, Callback)>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
  mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Handle returned by [`KeyedStore::subscribe`]. Dropping it keeps the callback registered;
/// call [`Subscription::unsubscribe`] to remove it.
#[must_use = "dropping a Subscription leaves the callback registered for the store's lifetime"]
pub struct Subscription {
  id: u64,
  subscribers: Weak<Mutex<Subscribers>>,
}

impl Subscription {
  pub fn unsubscribe(self) {
    if let Some(subs) = self.subscribers.upgrade() {
      lock(&subs).list.retain(|(id, _)| *id != self.id);
    }
  }

  pub fn is_active(&self) -> bool {
    self
      .subscribers
      .upgrade()
      .is_some_and(|subs| lock(&subs).list.iter().any(|(id, _)| *id == self.id))
  }
}

/// Insertion-ordered keyed collection with synchronous change notification.
///
/// Every mutator applies its change under the collection lock, releases it, and then
/// calls each subscriber in registration order on the calling thread. Callbacks may
/// read the store. A mutator that changes nothing does not notify.
pub struct KeyedStore<K, V> {
  entries: Mutex<Vec<(K, V)>>,
  subscribers: Arc<Mutex<Subscribers>>,
}

impl<K, V> Default for KeyedStore<K, V> {
  fn default() -> Self {
    Self { entries: Mutex::new(Vec::new()), subscribers: Arc::default() }
  }
}

impl<K: PartialEq + Clone, V: Clone> KeyedStore<K, V> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Run `f` against the raw entries. `f` reports whether it changed anything;
  /// subscribers are notified only in that case.
  pub fn apply<R>(&self, f: impl FnOnce(&mut Vec<(K, V)>) -> (R, bool)) -> R {
    let (out, changed) = {
      let mut entries = lock(&self.entries);
      f(&mut entries)
    };
    if changed {
      self.notify();
    }
    out
  }

  /// Insert at the end, or replace the value in place when the key exists.
  pub fn insert(&self, key: K, value: V) {
    self.apply(|entries| {
      match entries.iter_mut().find(|(k, _)| *k == key) {
        Some((_, v)) => *v = value,
        None => entries.push((key, value)),
      }
      ((), true)
    });
  }

  /// Mutate an existing value. Returns `false` (and does not notify) for unknown keys.
  pub fn update(&self, key: &K, f: impl FnOnce(&mut V)) -> bool {
    self.apply(|entries| match entries.iter_mut().find(|(k, _)| k == key) {
      Some((_, v)) => {
        f(v);
        (true, true)
      }
      None => (false, false),
    })
  }

  pub fn remove(&self, key: &K) -> Option<V> {
    self.apply(|entries| match entries.iter().position(|(k, _)| k == key) {
      Some(idx) => (Some(entries.remove(idx).1), true),
      None => (None, false),
    })
  }

  pub fn clear(&self) {
    self.apply(|entries| {
      let changed = !entries.is_empty();
      entries.clear();
      ((), changed)
    });
  }

  pub fn get(&self, key: &K) -> Option<V> {
    lock(&self.entries).iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
  }

  pub fn contains(&self, key: &K) -> bool {
    lock(&self.entries).iter().any(|(k, _)| k == key)
  }

  /// Defensive copy in insertion order.
  pub fn get_all(&self) -> Vec<(K, V)> {
    lock(&self.entries).clone()
  }

  pub fn values(&self) -> Vec<V> {
    lock(&self.entries).iter().map(|(_, v)| v.clone()).collect()
  }

  pub fn keys(&self) -> Vec<K> {
    lock(&self.entries).iter().map(|(k, _)| k.clone()).collect()
  }

  pub fn len(&self) -> usize {
    lock(&self.entries).len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl<K, V> KeyedStore<K, V> {
  pub fn subscribe(&self, callback: impl Fn() + Send + Sync + 'static) -> Subscription {
    let mut subs = lock(&self.subscribers);
    let id = subs.next_id;
    subs.next_id += 1;
    subs.list.push((id, Arc::new(callback)));
    Subscription { id, subscribers: Arc::downgrade(&self.subscribers) }
  }

  pub fn subscriber_count(&self) -> usize {
    lock(&self.subscribers).list.len()
  }

  fn notify(&self) {
    // Snapshot so callbacks can subscribe or unsubscribe without deadlocking.
    let callbacks: Vec<Callback> =
      lock(&self.subscribers).list.iter().map(|(_, cb)| Arc::clone(cb)).collect();
    for callback in callbacks {
      callback();
    }
  }
}
