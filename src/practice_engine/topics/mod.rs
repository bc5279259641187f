//! Topic generators grouped by exercise family.
//!
//! Every generator follows the same shape:
//!
//! ```ignore
//! pub fn generate(
//!     rng: &mut SeededRandom,
//!     ctx: GenerationContext,
//!     /* family parameters: kind, grade */
//! ) -> Result<Exercise, EngineError>
//! ```
//!
//! The registry binds the family parameters and dispatches to these.

/// NL- : locate an integer, select odd numbers
pub mod number_line;
/// DND- : even/odd sorting into zones
pub mod categorize;
/// VM- : long multiplication grids
pub mod vertical;
/// GRAPH- : plotting points
pub mod graphing;
/// SORT- : least-to-greatest ordering of whole numbers, decimals, fractions
pub mod ordering;
/// ADD- : sums, missing addends, estimates, decimals, like fractions
pub mod addition;
/// NPV- : number words, counting, comparing, place value, parity
pub mod place_value;
/// MUL- : times tables, repeated addition, products, properties, word problems (by grade)
pub mod multiplication;
