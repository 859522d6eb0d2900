use crate::parser::{AstNode, NameRef};
use crate::project::SourceUnit;

/// Every simple-name reference of a unit, in source order.
///
/// The iterator walks a fresh tree each call; nothing is cached.
pub fn extract(unit: &SourceUnit) -> impl Iterator<Item = NameRef> {
    unit.parse_result()
        .syntax()
        .descendants()
        .filter_map(NameRef::cast)
}
