//! Namespaced registry names and the extension identity they default to.
//!
//! A name is `namespace:localname`. While extensions are still loading, an
//! unqualified name is prefixed with the id of the extension that is
//! registering it on this worker (see [`ExtensionScope`]). Once content is
//! frozen there is no fix-up: unqualified names are rejected.

use std::borrow::Borrow;
use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;

use crate::error::{NameProblem, RegistryError, Result};

pub const NAMESPACE_SEPARATOR: char = ':';

/// A validated `namespace:localname` string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NamespacedName(String);

impl NamespacedName {
    /// Validate `name` without any fix-up.
    pub fn parse(name: &str) -> Result<Self> {
        validate_registry_name(name)?;
        Ok(Self(name.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn namespace(&self) -> &str {
        self.split().0
    }

    pub fn local_name(&self) -> &str {
        self.split().1
    }

    /// `self` with `suffix` appended to the local name.
    pub fn with_suffix(&self, suffix: &str) -> Result<Self> {
        Self::parse(&format!("{}{}", self.0, suffix))
    }

    fn split(&self) -> (&str, &str) {
        // Validated on construction, the separator is present.
        self.0
            .split_once(NAMESPACE_SEPARATOR)
            .unwrap_or((self.0.as_str(), ""))
    }
}

impl fmt::Display for NamespacedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NamespacedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NamespacedName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Reject names without exactly one namespace separator, or containing a
/// null byte or a space.
pub fn validate_registry_name(name: &str) -> Result<()> {
    let separators = name.matches(NAMESPACE_SEPARATOR).count();
    let problem = if separators == 0 {
        Some(NameProblem::MissingNamespace)
    } else if separators > 1 {
        Some(NameProblem::ExtraSeparator)
    } else if name.contains('\0') {
        Some(NameProblem::NullByte)
    } else if name.contains(' ') {
        Some(NameProblem::Space)
    } else {
        None
    };
    match problem {
        Some(problem) => Err(RegistryError::InvalidName {
            name: name.to_owned(),
            problem,
        }),
        None => Ok(()),
    }
}

/// Qualify an unqualified `name` with the active extension's id (only before
/// `frozen`), then validate it.
pub fn validate_and_fix_registry_name(name: &str, frozen: bool) -> Result<NamespacedName> {
    if !frozen && !name.contains(NAMESPACE_SEPARATOR) {
        if let Some(extension) = active_extension() {
            return NamespacedName::parse(&format!("{extension}{NAMESPACE_SEPARATOR}{name}"));
        }
    }
    NamespacedName::parse(name)
}

// -- Extension identity context --

thread_local! {
    static ACTIVE_EXTENSIONS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// Marks an extension as the one registering content on the current worker.
///
/// Scopes nest; dropping the guard restores the previous extension. The guard
/// is tied to the thread it was created on.
#[must_use = "the extension is only active while the scope is alive"]
pub struct ExtensionScope {
    _not_send: PhantomData<*const ()>,
}

impl ExtensionScope {
    pub fn enter(extension_id: impl Into<String>) -> Self {
        let id = extension_id.into();
        tracing::trace!("Entering extension scope '{}'", id);
        ACTIVE_EXTENSIONS.with(|stack| stack.borrow_mut().push(id));
        Self {
            _not_send: PhantomData,
        }
    }
}

impl Drop for ExtensionScope {
    fn drop(&mut self) {
        ACTIVE_EXTENSIONS.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// The extension currently registering on this worker, if any.
pub fn active_extension() -> Option<String> {
    ACTIVE_EXTENSIONS.with(|stack| stack.borrow().last().cloned())
}
