//! SDNet PX constructs produced by the lowering pass.
//!
//! These are plain data: the emitter decides indentation and coloring.

mod section;
mod tuple;


pub use section::{NextSection, Section, SectionMethod, SelectArm, Update};
pub use tuple::{TupleBody, TupleDef, TupleField, TupleInst, render_fields};

/// Name of the instance that accumulates the total extracted size.
pub const EXTRACTS_TUPLE: &str = "TopParser_extracts";

/// Type of [`EXTRACTS_TUPLE`].
pub const EXTRACTS_TUPLE_TYPE: &str = "TopParser_extracts_t";

/// Name of the instance holding value-set storage.
pub const LOCAL_TUPLE: &str = "local";

/// Type of [`LOCAL_TUPLE`].
pub const LOCAL_TUPLE_TYPE: &str = "local_t";
