//! Build-tool integration for Kombu.
//!
//! This crate compiles registered [style modules](StyleModule) into
//! plain CSS:
//!
//! - **Compilation**: each module authors rules through the
//!   [`kombu`] DSL; the compiler runs it against a fresh stylesheet
//!   and captures the rendered CSS.
//! - **Caching**: results are memoized per source path; invalidating a
//!   path also drops every cached result that depends on it.
//! - **Static extraction**: [`Compiler::emit`] writes the compiled CSS
//!   next to a `<stem>.kombu.css` naming scheme.
//! - **Hot reload** (feature `hot-reload`): [`SourceWatcher`] watches
//!   source files and recompiles affected modules on change.
//!
//! # Example
//!
//! ```
//! use kombu_compiler::{Compiler, StyleModule};
//!
//! let mut compiler = Compiler::new();
//! compiler.register(StyleModule::new("src/button.css.rs", |sheet| {
//!     sheet.select(".button")?.style([("border", "none")]);
//!     Ok(())
//! }));
//!
//! let result = compiler.compile("src/button.css.rs")?;
//! assert!(result.css.contains(".button {"));
//! # Ok::<(), kombu_compiler::Error>(())
//! ```

pub mod compiler;
pub mod module;

#[cfg(feature = "hot-reload")]
pub mod hot_reload;

mod error;

pub use error::{Error, Result};

pub use compiler::{CompileOptions, CompileResult, Compiler};
pub use module::StyleModule;

#[cfg(feature = "hot-reload")]
pub use hot_reload::{ChangeKind, SourceChangeEvent, SourceWatcher};
