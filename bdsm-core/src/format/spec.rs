//! Format-spec attributes written into every store
//!
//! These key/value pairs describe the layout for forward-compatibility
//! checks by callers. Readers expose them but do not enforce them.

/// Attribute key holding the format name
pub const FORMAT_KEY: &str = "format";

/// Attribute key holding the format-spec version
pub const VERSION_KEY: &str = "version";

/// Format name
pub const FORMAT_NAME: &str = "bdsm";

/// Format-spec version
pub const FORMAT_VERSION: &str = "1.0";

/// All format-spec attributes as `(key, value)` pairs
pub const FORMAT_SPEC: [(&str, &str); 2] = [(FORMAT_KEY, FORMAT_NAME), (VERSION_KEY, FORMAT_VERSION)];
