//! BIG-IP object name validators

use tfplug::validator::StringPatternValidator;

/// `/Partition/Name`
pub const F5_NAME_PATTERN: &str = r"^/[\w_\-.]+/[\w_\-.:]+$";

/// `/Partition/Name` or `/Partition/Directory/Name`
pub const F5_NAME_WITH_DIRECTORY_PATTERN: &str = r"^/[\w_\-.]+(/[\w_\-.]+)?/[\w_\-.:]+$";

pub fn f5_name() -> Result<StringPatternValidator, regex::Error> {
    StringPatternValidator::new(F5_NAME_PATTERN, "/Partition/Name format")
}

pub fn f5_name_with_directory() -> Result<StringPatternValidator, regex::Error> {
    StringPatternValidator::new(
        F5_NAME_WITH_DIRECTORY_PATTERN,
        "/Partition/Name or /Partition/Directory/Name format",
    )
}
