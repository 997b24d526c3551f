//! Country-level impact of climate change fields.
//!
//! Takes the cumulative change field from `grid-processor` and the country
//! set from `boundaries`, averages the change inside each country, converts
//! it to a damage fraction and ranks the countries.
//!
//! ```text
//! DeltaField ──► ParallelReducer (rayon pool)
//!                   │  per country: mean_change ─► damage
//!                   ▼
//!               Vec<CountryResult> ──► rank(top_n)
//! ```

pub mod aggregate;
pub mod damage;
pub mod pipeline;
pub mod ranking;
pub mod reducer;
pub mod result;

pub use aggregate::mean_change;
pub use damage::{damage, DAMAGE_COEFFICIENT};
pub use pipeline::{ImpactPipeline, RankingRequest};
pub use ranking::rank;
pub use reducer::ParallelReducer;
pub use result::CountryResult;
