//! Row-to-object hydration for hydromap.
//!
//! Takes raw result rows and turns them into entity field maps:
//!
//! - **Result-set mapping**: how result columns map onto entities, fields,
//!   meta columns, and joined associations.
//! - **Hints**: per-query options (in-place refresh, streaming iteration).
//! - **Simple entity hydrator**: the fast path for result sets selecting
//!   exactly one object type and no scalars, with discriminator-based
//!   subtype dispatch.
//!
//! # Example
//!
//! ```ignore
//! let rsm = ResultSetMapping::new()
//!     .add_entity("p", "Person")
//!     .add_typed_field("id", "id", SqlType::BigInt)
//!     .add_field("name", "name");
//!
//! let mut hydrator = SimpleEntityHydrator::new(rsm, meta, platform)?;
//! let entities = hydrator.hydrate_all(&mut rows, &mut sink, &HydrationHints::new())?;
//! ```

pub mod hydrator;
pub mod rsm;
pub mod session;

pub use hydrator::{FieldMap, HydrationSink, SimpleEntityHydrator};
pub use rsm::{FieldMapping, ResultSetMapping};
pub use session::HydrationHints;
