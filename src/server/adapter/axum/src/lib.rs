/* src/server/adapter/axum/src/lib.rs */

mod error;
mod handler;

use miniapp_host::MiniappHost;

/// Re-export the host core for convenience
pub use miniapp_host;

/// Extension trait that converts a `MiniappHost` into an Axum router.
pub trait IntoAxumRouter {
  fn into_axum_router(self) -> axum::Router;
  fn serve(
    self,
    addr: &str,
  ) -> impl std::future::Future<Output = Result<(), Box<dyn std::error::Error>>> + Send;
}

impl IntoAxumRouter for MiniappHost {
  fn into_axum_router(self) -> axum::Router {
    handler::build_router(self.into_parts())
  }

  async fn serve(self, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let router = self.into_axum_router();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(%local_addr, "mini-app host listening");
    axum::serve(listener, router).await?;
    Ok(())
  }
}
