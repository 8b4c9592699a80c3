//! Route-to-content resolution and the render/hydration pipeline for Vitrina.
//!
//! This crate provides:
//! - Route matching from a pathname to a [`PageKind`] plus typed [`Params`]
//! - The [`ContentSnapshot`] model and its wire format
//! - The [`ContentRepository`] trait and an in-memory implementation
//! - Loader dispatch ([`Dispatcher`]), one loader per page kind
//! - The prerender pass ([`PrerenderHost`]) and the embedded [`InitialPayload`]
//! - The client-side [`HydrationBootstrap`]
//! - The indexability decision ([`IndexPolicy`])
//!
//! Nothing here depends on a rendering runtime or an HTTP framework; the
//! server and the client share the same route table and dispatcher.

mod error;
pub mod hydration;
pub mod index;
mod kind;
pub mod loader;
pub mod payload;
pub mod prerender;
pub mod repository;
pub mod route;
pub mod snapshot;

pub use error::{Error, LoadFailure, PayloadError, RepositoryError, Result};
pub use hydration::{DEFAULT_LOAD_TIMEOUT, HydrationBootstrap, PageView};
pub use index::{IndexPolicy, LoadStatus, RobotsDirective, should_index};
pub use kind::PageKind;
pub use loader::Dispatcher;
pub use payload::{InitialPayload, PAYLOAD_ELEMENT_ID, extract_payload};
pub use prerender::{PageHead, Prerendered, PrerenderHost, RenderHost};
pub use repository::{Collection, ContentRepository, MemoryRepository, RecordKey};
pub use route::{ParamValue, Params, RouteDescriptor, RouteMatch, RouteTable, normalize_pathname};
pub use snapshot::{ContentSnapshot, ListingItem, PageContent, Section};
