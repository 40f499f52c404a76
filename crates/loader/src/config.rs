//! Command-line configuration for the loader binary.

use std::path::PathBuf;

/// How the loader should boot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Where to write the registry listing. `None` prints it to stdout.
    pub dump: Option<PathBuf>,
    /// Run the recipe pass after content is frozen instead of before.
    pub late_recipes: bool,
    /// Load the bundled demo extensions.
    pub demo: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            dump: None,
            late_recipes: false,
            demo: true,
        }
    }
}

impl LoaderConfig {
    /// Parse flags (without the program name).
    ///
    /// `--dump <path>`, `--late-recipes`, `--no-demo`. Unknown flags are ignored.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let dump = args
            .iter()
            .skip_while(|a| *a != "--dump")
            .nth(1)
            .map(PathBuf::from);
        Self {
            dump,
            late_recipes: args.iter().any(|a| a == "--late-recipes"),
            demo: !args.iter().any(|a| a == "--no-demo"),
        }
    }
}
