//! Core model types for writ.

mod patterns;
mod resolve;
mod section_name;
mod sections;
mod source;

pub use patterns::{HeadingMarker, Marker, Patterns, Reference, SectionDefinition};
pub use resolve::{
    assemble, find_cycle, indent, is_self_reproducing, resolve_references,
    unresolved_references, CycleDetector, MAX_EXPANSION_DEPTH,
};
pub use section_name::SectionName;
pub use sections::SectionMap;
pub use source::{OpenSection, Source, SECTION_HEADING_DEPTH};
