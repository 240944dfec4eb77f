//! `Vary` header list manipulation.
//!
//! # Responsibilities
//! - Split the `Vary` value into its tokens
//! - Subtract names from the list (`remove_vary_headers`)
//! - Add names to the list (`patch_vary_headers`)
//!
//! # Design Decisions
//! - Token order and spelling are preserved; caches may hash `Vary` verbatim
//! - Name comparison is case-insensitive, token output is not normalized
//! - Several `Vary` field lines are read as one list and written back as one
//! - Output separator is always `", "`

use std::collections::HashSet;
use std::sync::LazyLock;

use axum::http::{header::VARY, HeaderMap, HeaderValue};
use regex::Regex;

use crate::vary::error::{VaryError, VaryResult};

/// Comma with any surrounding whitespace.
static VARY_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*,\s*").expect("valid Vary delimiter pattern"));

/// What a `Vary` rewrite did to the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaryOutcome {
    /// Nothing to do: no directives, or no `Vary` header to filter.
    Untouched,
    /// `Vary` was replaced by an exclusive list.
    Replaced,
    /// `Vary` was rebuilt from its surviving tokens.
    Filtered { removed: usize },
    /// Every token was removed, so the header was deleted.
    Removed,
}

impl VaryOutcome {
    /// Label used for metrics and logs.
    pub fn label(&self) -> &'static str {
        match self {
            VaryOutcome::Untouched => "untouched",
            VaryOutcome::Replaced => "replaced",
            VaryOutcome::Filtered { .. } => "filtered",
            VaryOutcome::Removed => "removed",
        }
    }
}

/// Current `Vary` value, with multiple field lines joined by `", "`.
///
/// Returns `Ok(None)` when the response carries no `Vary` header.
fn joined_vary(headers: &HeaderMap) -> VaryResult<Option<String>> {
    let mut values = headers.get_all(VARY).iter().peekable();
    if values.peek().is_none() {
        return Ok(None);
    }

    let mut joined = String::new();
    for (i, value) in values.enumerate() {
        let text = value.to_str().map_err(|_| VaryError::NonTextValue)?;
        if i > 0 {
            joined.push_str(", ");
        }
        joined.push_str(text);
    }
    Ok(Some(joined))
}

fn split_tokens(value: &str) -> Vec<String> {
    VARY_DELIMITER.split(value).map(str::to_string).collect()
}

fn to_header_value(value: String) -> VaryResult<HeaderValue> {
    HeaderValue::from_str(&value).map_err(|_| VaryError::InvalidValue { value })
}

/// Tokens of the `Vary` header in field order, exactly as spelled.
///
/// An absent header yields an empty list.
pub fn vary_tokens(headers: &HeaderMap) -> VaryResult<Vec<String>> {
    Ok(joined_vary(headers)?
        .map(|value| split_tokens(&value))
        .unwrap_or_default())
}

/// Replace `Vary` with `value`, collapsing any existing field lines.
pub fn set_vary(headers: &mut HeaderMap, value: String) -> VaryResult<()> {
    let value = to_header_value(value)?;
    headers.insert(VARY, value);
    Ok(())
}

/// Remove `headers_to_remove` from the `Vary` header.
///
/// Matching is case-insensitive. Survivors keep their original order and
/// spelling and are re-joined with `", "`. If nothing survives the header is
/// deleted rather than left empty. A response without `Vary` is not touched.
///
/// On error the header map is left exactly as it was.
pub fn remove_vary_headers<S: AsRef<str>>(
    headers: &mut HeaderMap,
    headers_to_remove: &[S],
) -> VaryResult<VaryOutcome> {
    let Some(current) = joined_vary(headers)? else {
        return Ok(VaryOutcome::Untouched);
    };

    let unwanted: HashSet<String> = headers_to_remove
        .iter()
        .map(|name| name.as_ref().to_lowercase())
        .collect();

    let tokens = split_tokens(&current);
    let total = tokens.len();
    let survivors: Vec<String> = tokens
        .into_iter()
        .filter(|token| !unwanted.contains(&token.to_lowercase()))
        .collect();

    if survivors.is_empty() {
        headers.remove(VARY);
        return Ok(VaryOutcome::Removed);
    }

    let removed = total - survivors.len();
    set_vary(headers, survivors.join(", "))?;
    Ok(VaryOutcome::Filtered { removed })
}

/// Add `new_headers` to the `Vary` header.
///
/// Names already present (case-insensitive) are skipped, existing tokens keep
/// their order and new ones are appended in the order given. Nothing is
/// written when there is nothing to add.
pub fn patch_vary_headers<S: AsRef<str>>(
    headers: &mut HeaderMap,
    new_headers: &[S],
) -> VaryResult<()> {
    let mut tokens = vary_tokens(headers)?;
    let mut seen: HashSet<String> = tokens.iter().map(|t| t.to_lowercase()).collect();

    let before = tokens.len();
    for name in new_headers {
        let name = name.as_ref();
        if seen.insert(name.to_lowercase()) {
            tokens.push(name.to_string());
        }
    }

    if tokens.len() == before {
        return Ok(());
    }
    set_vary(headers, tokens.join(", "))
}
