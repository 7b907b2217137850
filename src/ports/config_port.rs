//! Configuration access port trait.

/// Read-only access to sectioned key/value settings.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
}
