//! Style module compilation with per-path memoization.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::module::StyleModule;

/// Include/exclude filtering for module paths.
///
/// `include` entries are suffixes a path must end with (any of them);
/// an empty list accepts everything. `exclude` entries are substrings
/// that reject a path outright and take precedence over `include`.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Accepted path suffixes, e.g. `.css.rs`.
    pub include: Vec<String>,
    /// Rejected path substrings, e.g. `target/`.
    pub exclude: Vec<String>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            include: vec![".css.rs".to_string(), ".style.rs".to_string()],
            exclude: vec!["target/".to_string()],
        }
    }
}

impl CompileOptions {
    /// Accept every path.
    pub fn permissive() -> Self {
        Self {
            include: vec![],
            exclude: vec![],
        }
    }

    /// Check a path against the filter.
    pub fn matches(&self, path: &Path) -> bool {
        let text = path.to_string_lossy();
        if self.exclude.iter().any(|e| text.contains(e.as_str())) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|i| text.ends_with(i.as_str()))
    }
}

/// Output of compiling one style module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileResult {
    /// The generated CSS.
    pub css: String,
    /// The module's source path.
    pub source_path: PathBuf,
    /// Files whose changes invalidate this result.
    pub dependencies: Vec<PathBuf>,
}

/// Compiles registered style modules into CSS.
///
/// Results are memoized per source path. The cache is a plain map:
/// entries only leave it through [`invalidate`](Self::invalidate) or
/// [`invalidate_all`](Self::invalidate_all), there is no eviction.
///
/// # Example
///
/// ```
/// use kombu_compiler::{Compiler, StyleModule};
///
/// let mut compiler = Compiler::new();
/// compiler.register(StyleModule::new("src/nav.css.rs", |sheet| {
///     sheet.select("nav")?.style([("display", "flex")]);
///     Ok(())
/// }));
///
/// let first = compiler.compile("src/nav.css.rs")?;
/// let second = compiler.compile("src/nav.css.rs")?;
/// assert_eq!(first, second);
/// # Ok::<(), kombu_compiler::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct Compiler {
    options: CompileOptions,
    modules: HashMap<PathBuf, StyleModule>,
    cache: HashMap<PathBuf, CompileResult>,
}

impl Compiler {
    /// Create a compiler with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a compiler with explicit filter options.
    pub fn with_options(options: CompileOptions) -> Self {
        Self {
            options,
            modules: HashMap::new(),
            cache: HashMap::new(),
        }
    }

    /// Register a style module, replacing any previous module for the
    /// same path. Registration drops a stale cache entry for the path.
    pub fn register(&mut self, module: StyleModule) {
        let path = module.source_path().to_path_buf();
        if !self.options.matches(&path) {
            tracing::warn!(path = %path.display(), "registered module does not match the compiler filter");
        }
        self.cache.remove(&path);
        self.modules.insert(path, module);
    }

    /// Whether a module is registered for a path.
    pub fn is_registered(&self, path: impl AsRef<Path>) -> bool {
        self.modules.contains_key(path.as_ref())
    }

    /// Number of registered modules.
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Compile a module, reusing the memoized result when present.
    ///
    /// # Errors
    ///
    /// Fails when the path is rejected by the filter, no module is
    /// registered for it, or the module's build function fails.
    pub fn compile(&mut self, path: impl AsRef<Path>) -> Result<CompileResult> {
        let path = path.as_ref();

        if let Some(hit) = self.cache.get(path) {
            tracing::debug!(path = %path.display(), "compile cache hit");
            return Ok(hit.clone());
        }

        if !self.options.matches(path) {
            return Err(Error::filtered(path));
        }

        let module = self
            .modules
            .get(path)
            .ok_or_else(|| Error::unknown_module(path))?;

        let css = module.run()?;
        let result = CompileResult {
            css,
            source_path: path.to_path_buf(),
            dependencies: module.dependencies().to_vec(),
        };

        tracing::info!(
            path = %path.display(),
            bytes = result.css.len(),
            "compiled style module"
        );
        self.cache.insert(path.to_path_buf(), result.clone());
        Ok(result)
    }

    /// Compile every registered module that passes the filter, in
    /// path order.
    pub fn compile_all(&mut self) -> Result<Vec<CompileResult>> {
        let mut paths: Vec<PathBuf> = self
            .modules
            .keys()
            .filter(|p| self.options.matches(p))
            .cloned()
            .collect();
        paths.sort();

        paths.into_iter().map(|p| self.compile(p)).collect()
    }

    /// Peek at a memoized result without compiling.
    pub fn cached(&self, path: impl AsRef<Path>) -> Option<&CompileResult> {
        self.cache.get(path.as_ref())
    }

    /// Drop the cached result for a path, plus every cached result
    /// that lists the path as a dependency. Returns the number of
    /// entries dropped.
    pub fn invalidate(&mut self, path: impl AsRef<Path>) -> usize {
        let path = path.as_ref();
        let before = self.cache.len();

        self.cache
            .retain(|source, result| source != path && !result.dependencies.iter().any(|d| d == path));

        let dropped = before - self.cache.len();
        if dropped > 0 {
            tracing::debug!(path = %path.display(), dropped, "invalidated compile cache entries");
        }
        dropped
    }

    /// Drop every cached result.
    pub fn invalidate_all(&mut self) {
        self.cache.clear();
    }

    /// Compile a module and write its CSS into `out_dir`.
    ///
    /// The output file name is derived from the source file stem with
    /// a `.kombu.css` suffix: `button.css.rs` becomes
    /// `button.kombu.css`.
    pub fn emit(&mut self, path: impl AsRef<Path>, out_dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        let out_dir = out_dir.as_ref();
        let result = self.compile(path)?;

        std::fs::create_dir_all(out_dir).map_err(|e| Error::io(out_dir, e))?;
        let out_path = out_dir.join(output_file_name(path));
        std::fs::write(&out_path, &result.css).map_err(|e| Error::io(&out_path, e))?;

        tracing::info!(
            source = %path.display(),
            output = %out_path.display(),
            "emitted compiled CSS"
        );
        Ok(out_path)
    }
}

/// Derive the emitted file name for a source path:
/// `src/button.css.rs` becomes `button.kombu.css`.
fn output_file_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "style".to_string());
    // Strip a `.css`/`.style` inner extension left over from the
    // `.css.rs` naming convention.
    let stem = stem
        .strip_suffix(".css")
        .or_else(|| stem.strip_suffix(".style"))
        .map(str::to_string)
        .unwrap_or(stem);
    format!("{stem}.kombu.css")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::StyleModule;

    fn button_module() -> StyleModule {
        StyleModule::new("src/button.css.rs", |sheet| {
            sheet.select(".button")?.style([("border", "none")]);
            Ok(())
        })
    }

    #[test]
    fn compile_produces_css() {
        let mut compiler = Compiler::new();
        compiler.register(button_module());

        let result = compiler.compile("src/button.css.rs").unwrap();
        assert_eq!(result.css, ".button {\n    border: none;\n}");
        assert_eq!(result.source_path, PathBuf::from("src/button.css.rs"));
    }

    #[test]
    fn results_are_memoized_per_path() {
        let mut compiler = Compiler::new();
        compiler.register(button_module());

        let first = compiler.compile("src/button.css.rs").unwrap();
        assert!(compiler.cached("src/button.css.rs").is_some());
        let second = compiler.compile("src/button.css.rs").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_module_fails() {
        let mut compiler = Compiler::new();
        assert!(matches!(
            compiler.compile("src/missing.css.rs"),
            Err(Error::UnknownModule { .. })
        ));
    }

    #[test]
    fn filter_rejects_non_matching_paths() {
        let mut compiler = Compiler::new();
        compiler.register(StyleModule::new("src/main.rs", |_| Ok(())));

        assert!(matches!(
            compiler.compile("src/main.rs"),
            Err(Error::Filtered { .. })
        ));

        let options = CompileOptions::default();
        assert!(options.matches(Path::new("src/button.css.rs")));
        assert!(options.matches(Path::new("src/button.style.rs")));
        assert!(!options.matches(Path::new("src/main.rs")));
        assert!(!options.matches(Path::new("target/debug/a.css.rs")));
        assert!(CompileOptions::permissive().matches(Path::new("anything")));
    }

    #[test]
    fn build_errors_surface() {
        let mut compiler = Compiler::new();
        compiler.register(StyleModule::new("src/bad.css.rs", |sheet| {
            sheet.select("div >")?.style([("color", "red")]);
            Ok(())
        }));

        assert!(matches!(
            compiler.compile("src/bad.css.rs"),
            Err(Error::Build(_))
        ));
        // Failures are not cached.
        assert!(compiler.cached("src/bad.css.rs").is_none());
    }

    #[test]
    fn invalidate_drops_direct_entry() {
        let mut compiler = Compiler::new();
        compiler.register(button_module());
        compiler.compile("src/button.css.rs").unwrap();

        assert_eq!(compiler.invalidate("src/button.css.rs"), 1);
        assert!(compiler.cached("src/button.css.rs").is_none());
        assert_eq!(compiler.invalidate("src/button.css.rs"), 0);
    }

    #[test]
    fn invalidate_drops_dependents() {
        let mut compiler = Compiler::new();
        compiler.register(
            StyleModule::new("src/themed.css.rs", |sheet| {
                sheet.select(".themed")?.style([("color", "var(--accent)")]);
                Ok(())
            })
            .with_dependency("src/theme.rs"),
        );
        compiler.register(button_module());
        compiler.compile_all().unwrap();

        // The theme file is not itself a module, but the module that
        // depends on it loses its cache entry.
        assert_eq!(compiler.invalidate("src/theme.rs"), 1);
        assert!(compiler.cached("src/themed.css.rs").is_none());
        assert!(compiler.cached("src/button.css.rs").is_some());
    }

    #[test]
    fn compile_all_is_ordered_by_path() {
        let mut compiler = Compiler::new();
        compiler.register(StyleModule::new("src/b.css.rs", |sheet| {
            sheet.select(".b")?.style([("color", "blue")]);
            Ok(())
        }));
        compiler.register(StyleModule::new("src/a.css.rs", |sheet| {
            sheet.select(".a")?.style([("color", "red")]);
            Ok(())
        }));

        let results = compiler.compile_all().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].source_path, PathBuf::from("src/a.css.rs"));
        assert_eq!(results[1].source_path, PathBuf::from("src/b.css.rs"));
    }

    #[test]
    fn re_registration_drops_stale_cache() {
        let mut compiler = Compiler::new();
        compiler.register(button_module());
        compiler.compile("src/button.css.rs").unwrap();

        compiler.register(StyleModule::new("src/button.css.rs", |sheet| {
            sheet.select(".button")?.style([("border", "1px solid")]);
            Ok(())
        }));

        let result = compiler.compile("src/button.css.rs").unwrap();
        assert_eq!(result.css, ".button {\n    border: 1px solid;\n}");
    }

    #[test]
    fn emit_writes_css_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut compiler = Compiler::new();
        compiler.register(button_module());

        let out_path = compiler.emit("src/button.css.rs", dir.path()).unwrap();
        assert_eq!(out_path, dir.path().join("button.kombu.css"));

        let written = std::fs::read_to_string(&out_path).unwrap();
        assert_eq!(written, ".button {\n    border: none;\n}");
    }

    #[test]
    fn output_file_names() {
        assert_eq!(
            output_file_name(Path::new("src/button.css.rs")),
            "button.kombu.css"
        );
        assert_eq!(
            output_file_name(Path::new("nav.style.rs")),
            "nav.kombu.css"
        );
        assert_eq!(output_file_name(Path::new("plain.rs")), "plain.kombu.css");
    }
}
