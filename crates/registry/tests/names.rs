//! Registry name validation and extension-scoped auto-qualification.

use ultimate_registry::error::{NameProblem, RegistryError};
use ultimate_registry::name::{
    active_extension, validate_and_fix_registry_name, validate_registry_name, ExtensionScope,
    NamespacedName,
};

fn problem(name: &str) -> Option<NameProblem> {
    match validate_registry_name(name) {
        Ok(()) => None,
        Err(RegistryError::InvalidName { problem, .. }) => Some(problem),
        Err(other) => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn strict_validation() {
    assert_eq!(problem("foo"), Some(NameProblem::MissingNamespace));
    assert_eq!(problem("mod:foo"), None);
    assert_eq!(problem("mod:fo o"), Some(NameProblem::Space));
    assert_eq!(problem("mod:fo\0o"), Some(NameProblem::NullByte));
}

#[test]
fn exactly_one_separator() {
    assert_eq!(problem("mod:sub:foo"), Some(NameProblem::ExtraSeparator));
    assert_eq!(problem("mod::foo"), Some(NameProblem::ExtraSeparator));
    assert!(NamespacedName::parse("mod:sub:foo").is_err());

    // A qualified-looking local name is not re-qualified.
    let _scope = ExtensionScope::enter("examplemod");
    let err = validate_and_fix_registry_name("other:sub:foo", false).unwrap_err();
    assert!(matches!(
        err,
        RegistryError::InvalidName { problem: NameProblem::ExtraSeparator, .. }
    ));
}

#[test]
fn namespaced_name_parts() {
    let name = NamespacedName::parse("examplemod:test_block").unwrap();
    assert_eq!(name.namespace(), "examplemod");
    assert_eq!(name.local_name(), "test_block");
    assert_eq!(name.with_suffix("_full").unwrap().as_str(), "examplemod:test_block_full");
    assert_eq!(name.to_string(), "examplemod:test_block");
}

#[test]
fn unqualified_name_takes_active_extension_before_freeze() {
    let _scope = ExtensionScope::enter("examplemod");
    let fixed = validate_and_fix_registry_name("ruby", false).unwrap();
    assert_eq!(fixed.as_str(), "examplemod:ruby");

    // Already qualified names are left alone.
    let kept = validate_and_fix_registry_name("other:ruby", false).unwrap();
    assert_eq!(kept.as_str(), "other:ruby");
}

#[test]
fn no_fix_up_after_freeze() {
    let _scope = ExtensionScope::enter("examplemod");
    let err = validate_and_fix_registry_name("ruby", true).unwrap_err();
    assert!(matches!(
        err,
        RegistryError::InvalidName { problem: NameProblem::MissingNamespace, .. }
    ));
}

#[test]
fn no_fix_up_without_extension() {
    assert_eq!(active_extension(), None);
    assert!(validate_and_fix_registry_name("ruby", false).is_err());
}

#[test]
fn fixed_name_is_still_validated() {
    let _scope = ExtensionScope::enter("examplemod");
    let err = validate_and_fix_registry_name("big ruby", false).unwrap_err();
    assert!(matches!(err, RegistryError::InvalidName { problem: NameProblem::Space, .. }));
}

#[test]
fn scopes_nest_and_unwind() {
    let outer = ExtensionScope::enter("outer");
    {
        let _inner = ExtensionScope::enter("inner");
        assert_eq!(active_extension().as_deref(), Some("inner"));
    }
    assert_eq!(active_extension().as_deref(), Some("outer"));
    drop(outer);
    assert_eq!(active_extension(), None);
}

#[test]
fn scope_is_per_worker() {
    let _scope = ExtensionScope::enter("main_thread_mod");
    let seen = std::thread::spawn(active_extension).join().unwrap();
    assert_eq!(seen, None);
}
