use std::fmt::{self, Debug, Formatter};

/// Writes an already formatted string as-is, for use as a field in a debug builder.
pub struct DebugRaw(pub String);

impl Debug for DebugRaw {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
