//! Stable identifiers for diagnostics and comment markers.
//!
//! Rule IDs are not listed here: they are derived from each rule's base policy
//! (`<provider>-<service>-<short_code>`).

pub const TOOL_NAME: &str = "tfguard";

// Diagnostic codes
pub const CODE_PARSE_ERROR: &str = "parse_error";
pub const CODE_MODULE_LOAD_ERROR: &str = "module_load_error";
pub const CODE_CHECK_PANIC: &str = "check_panic";
pub const CODE_UNKNOWN_RULE: &str = "unknown_rule";
pub const CODE_IGNORE_UNKNOWN_RULE: &str = "ignore_unknown_rule";

// Inline ignore comments: `# tfguard:ignore:<rule-id>[:exp:YYYY-MM-DD]`
pub const IGNORE_MARKER: &str = "tfguard:ignore:";
pub const IGNORE_EXPIRY_MARKER: &str = ":exp:";
pub const IGNORE_ALL: &str = "*";
