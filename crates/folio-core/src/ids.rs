//! Record identifier generation.

use uuid::Uuid;

/// Create a record id of the form `<prefix>-<uuid v4>`.
///
/// # Example
///
/// ```
/// let id = folio_core::ids::create_id("stat");
/// assert!(id.starts_with("stat-"));
/// ```
pub fn create_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_prefixed_and_unique() {
        let a = create_id("project");
        let b = create_id("project");
        assert!(a.starts_with("project-"));
        assert_eq!(a.len(), "project-".len() + 36);
        assert_ne!(a, b);
    }
}
