#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Parser IR for the psdn lowering pass.
//!
//! A [`ParserUnit`] is one protocol parser: its apply-parameters, parser-local
//! declarations, and states. Units are plain data, deserialized from JSON
//! produced by the frontend, and are never mutated by the lowering pass.

mod colors;
mod expr;
mod ir;
mod span;
mod types;


pub use colors::{Colors, Role};
pub use expr::{BinaryOp, Expr, ExprKind, UnaryOp};
pub use ir::{
    Direction, Keyset, LocalDecl, Param, ParserState, ParserUnit, SelectCase, Statement,
    Transition,
};
pub use span::Span;
pub use types::{FieldDecl, TypeDecl, TypeRef};

/// Name of the extern type that supplies packet bytes to a parser.
pub const PACKET_SOURCE_EXTERN: &str = "packet_in";

/// Method on the packet source that consumes bytes into a header.
pub const EXTRACT_METHOD: &str = "extract";

/// Parse a single parser unit from JSON.
pub fn parse_unit(json: &str) -> Result<ParserUnit, serde_json::Error> {
    serde_json::from_str(json)
}
