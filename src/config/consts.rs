/// Default directory that fetched modules are installed into.
pub const DEFAULT_INSTALL_DIR: &str = "engine_modules";
/// File extension of the install manifest written for each fetched module.
pub const MANIFEST_EXTENSION: &str = "json";
