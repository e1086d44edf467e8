// Static portfolio content: loading, validation, and the read-only queries
// the assistant uses as tools.

pub mod loader;
pub mod queries;
