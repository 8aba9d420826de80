//! Style module registration.

use std::fmt;
use std::path::{Path, PathBuf};

use kombu::StyleSheet;

/// Function that authors the rules of one style module.
pub type BuildFn = Box<dyn Fn(&StyleSheet) -> kombu::Result<()> + Send + Sync>;

/// A registered producer of styles for one source path.
///
/// A module pairs a source path with a build function that authors
/// rules through the [`kombu`] DSL, plus the file dependencies whose
/// changes should invalidate its compiled output.
pub struct StyleModule {
    source_path: PathBuf,
    dependencies: Vec<PathBuf>,
    build: BuildFn,
}

impl StyleModule {
    /// Create a style module for a source path.
    pub fn new(
        source_path: impl Into<PathBuf>,
        build: impl Fn(&StyleSheet) -> kombu::Result<()> + Send + Sync + 'static,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            dependencies: vec![],
            build: Box::new(build),
        }
    }

    /// Declare a file dependency.
    ///
    /// A change to the dependency invalidates this module's cached
    /// output even though the module's own source did not change.
    pub fn with_dependency(mut self, path: impl Into<PathBuf>) -> Self {
        self.dependencies.push(path.into());
        self
    }

    /// The module's source path.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Declared file dependencies.
    pub fn dependencies(&self) -> &[PathBuf] {
        &self.dependencies
    }

    /// Run the build function against a fresh stylesheet and render
    /// the resulting CSS.
    pub(crate) fn run(&self) -> kombu::Result<String> {
        let sheet = StyleSheet::new();
        (self.build)(&sheet)?;
        Ok(sheet.build())
    }
}

impl fmt::Debug for StyleModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleModule")
            .field("source_path", &self.source_path)
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_runs_against_a_fresh_sheet() {
        let module = StyleModule::new("a.css.rs", |sheet| {
            sheet.select(".a")?.style([("color", "red")]);
            Ok(())
        });

        let css = module.run().unwrap();
        assert_eq!(css, ".a {\n    color: red;\n}");
        // A second run starts from scratch.
        assert_eq!(module.run().unwrap(), css);
    }

    #[test]
    fn build_errors_propagate() {
        let module = StyleModule::new("bad.css.rs", |sheet| {
            sheet.select("div >")?.style([("color", "red")]);
            Ok(())
        });

        assert!(module.run().is_err());
    }

    #[test]
    fn dependencies_accumulate() {
        let module = StyleModule::new("a.css.rs", |_| Ok(()))
            .with_dependency("theme.rs")
            .with_dependency("tokens.rs");

        assert_eq!(module.dependencies().len(), 2);
        assert_eq!(module.source_path(), Path::new("a.css.rs"));
    }
}
