//! Compact JSON array encoding of a tree

use super::registry::{FormatError, Formatter};
use crate::postproc::options::Options;
use crate::postproc::tree::ParseNode;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, tree: &ParseNode, _options: &Options) -> Result<String, FormatError> {
        serde_json::to_string(tree).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Nested JSON arrays, the same encoding the parser emits"
    }
}
