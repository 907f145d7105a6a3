pub mod api;
pub mod bridge;
pub mod config;
pub mod core;
pub mod error;
pub mod input;
pub mod renderer;
pub mod sol;
pub mod view;

// Re-export key types at crate root for convenience
pub use api::session::Session;
pub use api::types::{BodyId, OrreryEvent};
pub use bridge::protocol::ProtocolLayout;
pub use config::OrreryConfig;
pub use core::body::{BodyKind, CelestialBody, ChildRange, OrbitalElements};
pub use core::builder::{build_catalog, Attribute, CatalogBuilder};
pub use core::catalog::{BodyCatalog, Children};
pub use core::kepler::{update_positions, KeplerSolver};
pub use core::time::{FixedTimestep, SimClock};
pub use error::{CatalogError, CatalogResult, ConfigError};
pub use input::queue::{ClickTracker, CustomKind, InputEvent, InputQueue};
pub use renderer::instance::{BodyBuffer, BodyInstance};
pub use renderer::ribbon::{RibbonMesh, RibbonSpan, RibbonStyle, RibbonVertex};
pub use view::{Observer, Viewport};
