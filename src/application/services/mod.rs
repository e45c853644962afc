//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, TermSource)
//! but are themselves concrete structs, not traits.

mod glossary;

pub use glossary::{ExpandOutcome, GlossaryService, WILD_CARD};
