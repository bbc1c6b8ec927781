#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the deployment workspace.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! tnode-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Turns a named-field enum into a workspace error type.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * `<ErrorName>Ext` trait with `.context(...)` for `Result<T, ErrorName>` and, for every
///   variant carrying a source, for `Result<T, SourceError>` as well.
/// * `From<SourceError>` for variants with a `source` field (or a field marked
///   `#[source]`/`#[from]`), so `?` converts upstream errors.
/// * `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * A private `format_context` helper for use inside `#[error(...)]` strings.
///
/// # Requirements
///
/// 1. Only enums are accepted.
/// 2. Variants must use named fields; tuple and unit variants are rejected.
/// 3. Source-carrying variants must also carry `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[tnode_derive::tnode_error]
/// pub enum StoreError {
///     #[error("Store I/O error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Store fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &std::path::Path) -> Result<Vec<u8>, StoreError> {
///     std::fs::read(path).context("Reading deployment record")
/// }
/// ```
#[proc_macro_attribute]
pub fn tnode_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}
