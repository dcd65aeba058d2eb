use listing_manifest::{IdentifierRegistry, PackageOrigin, Rejection};
use listing_test_utils::package::manifest_toml;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn origin(repository: &str, git_ref: &str) -> PackageOrigin {
    PackageOrigin::new(repository, git_ref)
}

#[test]
fn test_admit_registers_identifier() {
    let mut registry = IdentifierRegistry::new();
    let manifest = manifest_toml("foo");

    let id = registry
        .admit(Some(manifest.as_bytes()), &origin("a/foo", "main"))
        .unwrap();

    assert_eq!(id, "foo");
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.claimant("foo"), Some(&origin("a/foo", "main")));
}

#[test]
fn test_first_claim_wins_collision() {
    let mut registry = IdentifierRegistry::new();
    let manifest = manifest_toml("shared");

    registry
        .admit(Some(manifest.as_bytes()), &origin("first/repo", "main"))
        .unwrap();
    let rejection = registry
        .admit(Some(manifest.as_bytes()), &origin("second/repo", "v1.0.0"))
        .unwrap_err();

    assert_eq!(
        rejection,
        Rejection::Collision {
            id: "shared".to_string(),
            claimed_by: origin("first/repo", "main"),
        }
    );
    assert_eq!(registry.claimant("shared"), Some(&origin("first/repo", "main")));
    assert!(rejection.to_string().contains("first/repo@main"));
}

#[rstest]
#[case::no_manifest(None, Rejection::MissingManifest)]
#[case::no_id(Some("version = \"1.0.0\"\n"), Rejection::MissingId)]
#[case::empty_id(Some("id = \"\"\n"), Rejection::MissingId)]
fn test_rejections_leave_registry_untouched(
    #[case] manifest: Option<&str>,
    #[case] expected: Rejection,
) {
    let mut registry = IdentifierRegistry::new();
    let rejection = registry
        .admit(manifest.map(str::as_bytes), &origin("a/b", "main"))
        .unwrap_err();
    assert_eq!(rejection, expected);
    assert!(registry.is_empty());
}

#[test]
fn test_malformed_manifest_is_rejected() {
    let mut registry = IdentifierRegistry::new();
    let rejection = registry
        .admit(Some(b"id = \"unterminated\n"), &origin("a/b", "main"))
        .unwrap_err();
    assert!(matches!(rejection, Rejection::MalformedManifest { .. }));
    assert!(registry.is_empty());
}

#[test]
fn test_rejected_candidate_does_not_block_later_claim() {
    let mut registry = IdentifierRegistry::new();
    registry
        .admit(None, &origin("broken/repo", "main"))
        .unwrap_err();

    let manifest = manifest_toml("foo");
    let id = registry
        .admit(Some(manifest.as_bytes()), &origin("good/repo", "main"))
        .unwrap();
    assert_eq!(id, "foo");
}

#[rstest]
#[case::separator("nested/name")]
#[case::traversal("../escaped")]
#[case::dot_dot("..")]
#[case::dotted("dotted.name")]
fn test_id_unusable_as_file_name_is_rejected(#[case] id: &str) {
    let mut registry = IdentifierRegistry::new();
    let manifest = manifest_toml(id);

    let rejection = registry
        .admit(Some(manifest.as_bytes()), &origin("a/b", "main"))
        .unwrap_err();

    assert_eq!(rejection, Rejection::InvalidId { id: id.to_string() });
    assert!(registry.is_empty());
}
