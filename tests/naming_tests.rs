//! Property tests for tenant-scoped collection naming.

use proptest::prelude::*;

use datastore_client::qualified_collection_name;

proptest! {
    /// Qualified names always carry the tenant prefix, whatever the inputs.
    #[test]
    fn prop_qualified_name_has_tenant_prefix(tenant in ".{0,32}", name in ".{0,32}") {
        let qualified = qualified_collection_name(&tenant, &name);
        prop_assert!(qualified.starts_with("tenant_"));
    }

    /// The normalized name only ever contains lowercase alphanumerics and
    /// underscores, so it is safe as a vector-store collection identifier.
    #[test]
    fn prop_qualified_name_is_normalized(tenant in ".{0,32}", name in ".{0,32}") {
        let qualified = qualified_collection_name(&tenant, &name);
        prop_assert!(
            qualified.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'),
            "unexpected character in {qualified:?}"
        );
    }

    /// Normalization is stable: feeding a qualified name back through changes
    /// nothing but the added prefix.
    #[test]
    fn prop_normalization_is_idempotent(tenant in "[a-z0-9_]{1,16}", name in "[a-z0-9_]{1,16}") {
        let qualified = qualified_collection_name(&tenant, &name);
        prop_assert_eq!(qualified, format!("tenant_{tenant}_{name}"));
    }
}
