//! Country boundaries for spatial aggregation.
//!
//! Boundaries are loaded once at startup by a background task and published
//! into a [`BoundaryStore`]. Until then, every consumer sees
//! `BoundaryNotReady`.

pub mod country;
pub mod error;
pub mod geojson;
pub mod loader;
pub mod store;

pub use country::{is_excluded, CountryPolygon, CountrySet, EXCLUDED_COUNTRIES};
pub use error::{BoundaryError, Result};
pub use geojson::{parse_feature_collection, NamedGeometry, UNKNOWN_NAME};
pub use loader::{spawn_loader, BoundaryLoader, BoundarySource, LoaderConfig, DEFAULT_BOUNDARIES_URL};
pub use store::BoundaryStore;
