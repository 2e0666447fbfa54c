/* src/server/adapter/axum/src/handler/subscribe.rs */

use std::convert::Infallible;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use futures_core::Stream;
use miniapp_host::StorefrontSnapshot;
use miniapp_host::storefront::StorefrontSubscription;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::UnboundedReceiverStream;

use super::AppState;
use crate::error::AxumError;

/// Snapshot feed that drops its store callbacks when the client disconnects.
struct SnapshotStream {
  inner: UnboundedReceiverStream<StorefrontSnapshot>,
  subscription: Option<StorefrontSubscription>,
}

impl Stream for SnapshotStream {
  type Item = StorefrontSnapshot;

  fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
    Pin::new(&mut self.inner).poll_next(cx)
  }
}

impl Drop for SnapshotStream {
  fn drop(&mut self) {
    if let Some(sub) = self.subscription.take() {
      sub.unsubscribe();
      tracing::debug!("storefront event stream closed");
    }
  }
}

fn snapshot_event(snapshot: &StorefrontSnapshot) -> Result<Event, Infallible> {
  let data = serde_json::to_string(snapshot).unwrap_or_default();
  Ok(Event::default().event("snapshot").data(data))
}

/// SSE: the current snapshot, then one snapshot per cart, favorites or edit mutation.
pub(super) async fn handle_events(
  State(state): State<Arc<AppState>>,
  Path(store): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AxumError> {
  let store = state.storefront(&store)?.clone();
  let (tx, rx) = tokio::sync::mpsc::unbounded_channel();

  // Weak: the callback lives inside the store it reads from.
  let weak = Arc::downgrade(&store);
  let subscription = store.subscribe(move || {
    if let Some(store) = weak.upgrade() {
      let _ = tx.send(store.snapshot());
    }
  });

  let updates = SnapshotStream {
    inner: UnboundedReceiverStream::new(rx),
    subscription: Some(subscription),
  };
  let initial = store.snapshot();
  let stream =
    tokio_stream::once(initial).chain(updates).map(|snapshot| snapshot_event(&snapshot));
  Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
