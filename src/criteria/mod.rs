/// Criteria normalization for the OrientDB target dialect.
///
/// Waterline hands adapters a database-agnostic criteria object. Before it
/// reaches the OrientDB driver, its `where` branch is rewritten:
///
/// ```text
/// Criteria (JSON object)
///       ↓
/// Criteria Normalizer   (normalizer.rs, `where` only; other keys pass through)
///       ↓
/// Clause Rewriter       (normalizer.rs, recursive over and/or/nor)
///       ↓
/// Normalized Criteria   (`id` → `@rid`, combinators rebuilt)
/// ```
///
/// The schema (schema.rs) is carried alongside for membership checks, and
/// analysis.rs reports on the structure of a criteria object without
/// rewriting it.
pub mod analysis;
pub mod dialect;
pub mod normalizer;
pub mod schema;

pub use analysis::{analyze_criteria, CriteriaAnalysis};
pub use dialect::{Combinator, ID_KEY, PRIMARY_KEY_FIELD, WHERE_KEY};
pub use normalizer::{normalize, CombinatorPolicy, Criteria, Normalizer};
pub use schema::{Attribute, Schema};
