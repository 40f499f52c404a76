use thiserror::Error;

/// Why a registry name was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameProblem {
    MissingNamespace,
    /// More than one `:`.
    ExtraSeparator,
    NullByte,
    Space,
}

impl std::fmt::Display for NameProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NameProblem::MissingNamespace => {
                f.write_str("add your extension id to the registry name, ex \"modid:item\"")
            }
            NameProblem::ExtraSeparator => {
                f.write_str("registry names take exactly one ':' separator")
            }
            NameProblem::NullByte => f.write_str("null bytes are not supported in registry names"),
            NameProblem::Space => f.write_str("spaces are not supported in registry names"),
        }
    }
}

/// Everything a registration call can fail with.
///
/// Exhausting a reserved id range is deliberately absent: allocation degrades
/// to the caller's fallback id instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("invalid registry name {name:?}: {problem}")]
    InvalidName { name: String, problem: NameProblem },

    #[error("too late to {operation}, all extensions are already loaded")]
    ContentFrozen { operation: &'static str },

    #[error("too late to register recipes")]
    RecipesFrozen,

    #[error("a game registry was already created in this process")]
    DuplicateInstance,

    #[error("{name:?} is already registered as an item without a block")]
    NotABlock { name: String },

    #[error("invalid recipe: {reason}")]
    InvalidRecipe { reason: String },

    #[error("fallback block id {id} is outside 0..={max}", max = crate::ids::MAXIMUM_BLOCK_ID)]
    InvalidBlockFallback { id: i32 },
}

pub type Result<T> = std::result::Result<T, RegistryError>;
