/* src/server/core/rust/src/lib.rs */

pub mod apps;
pub mod config;
pub mod errors;
pub mod loadable;
pub mod persist;
pub mod registry;
pub mod remote;
pub mod route;
pub mod router;
pub mod server;
pub mod store;
pub mod storefront;
pub mod survey;
pub mod theme;

// Re-exports for ergonomic use
pub use apps::{BuiltinOptions, builtin_host};
pub use config::{MiniappConfig, MiniappPage, MiniappSummary, PageCtx, RenderFn};
pub use errors::HostError;
pub use loadable::Loadable;
pub use persist::LocalState;
pub use registry::Registry;
pub use remote::{FormSubmission, PastOrder, RemoteClient};
pub use route::{RouteParams, RoutePattern};
pub use router::{Location, Resolution, ResolvedPage, Router};
pub use server::{HostParts, MiniappHost};
pub use store::{KeyedStore, Subscription};
pub use storefront::{
  Cart, CartItem, CartLine, CartUpdate, CatalogItem, Favorites, PendingEdit, Storefront,
  StorefrontSnapshot, TempEdits,
};
pub use survey::{SurveyFlow, SurveyState};
