//! Top-level dispatch: a document is either a single node object, an
//! array of them, or (rarely) a bare value — the last has no node to
//! attach to and produces no quads, matching [`crate::node::expand_element`]'s
//! treatment of a scalar found at node position.

use crate::error::Result;
use crate::node::expand_element;
use crate::Walker;
use json_ld_core::{Context, GraphName};
use json_ld_syntax::Value;

/// Walks the whole document into the default graph.
pub fn expand_document(document: &Value, context: &Context, walker: &mut Walker<'_>) -> Result<()> {
	expand_element(document, context, GraphName::Default, walker)?;
	Ok(())
}
