// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display)
pub const APP_NAME: &str = "Formbase";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "formbase";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".formbase";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "formbase.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "FORMBASE_CONFIG";

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable for debug mode
pub const ENV_DEBUG: &str = "FORMBASE_DEBUG";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "FORMBASE_LOG";

/// Environment variable for output format
pub const ENV_FORMAT: &str = "FORMBASE_FORMAT";

/// Environment variable for the maximum number of rules per list
pub const ENV_MAX_RULES: &str = "FORMBASE_MAX_RULES";

// =============================================================================
// Output
// =============================================================================

/// Shown when a filter leaves no visible fields
pub const NO_MATCHING_FIELDS: &str = "No fields match your filters.";

/// Placeholder for a field with no stored value
pub const EMPTY_VALUE: &str = "-";
