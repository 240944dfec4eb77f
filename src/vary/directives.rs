//! Per-response `Vary` directives.
//!
//! Handlers declare how the final `Vary` header should look by leaving a
//! [`VaryDirectives`] value in the response extensions. The post-processor
//! reads it once the whole response stack has run.

use axum::http::{Extensions, Response};

/// `Vary` declarations attached to a single response.
///
/// Lives in `http::Extensions`, so it never outlives the response it was
/// attached to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VaryDirectives {
    only_vary_on: Vec<String>,
    dont_vary_on: Vec<String>,
}

impl VaryDirectives {
    /// Exclusive list; wins over `dont_vary_on` whenever non-empty.
    pub fn only_vary_on(&self) -> &[String] {
        &self.only_vary_on
    }

    /// Names to strip from whatever `Vary` accumulated.
    pub fn dont_vary_on(&self) -> &[String] {
        &self.dont_vary_on
    }

    /// Replace the exclusive list. Last write wins.
    pub fn replace_only_vary_on<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only_vary_on = names.into_iter().map(Into::into).collect();
    }

    /// Append to the exclusion list. Repeated calls accumulate.
    pub fn extend_dont_vary_on<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dont_vary_on.extend(names.into_iter().map(Into::into));
    }

    pub fn is_empty(&self) -> bool {
        self.only_vary_on.is_empty() && self.dont_vary_on.is_empty()
    }

    /// Directives attached to `response`, if any.
    pub fn of<B>(response: &Response<B>) -> Option<&VaryDirectives> {
        response.extensions().get::<VaryDirectives>()
    }

    /// Run `f` against the directives stored in `extensions`, creating them
    /// if this is the first declaration for the response.
    pub fn update(extensions: &mut Extensions, f: impl FnOnce(&mut VaryDirectives)) {
        let mut directives = extensions.remove::<VaryDirectives>().unwrap_or_default();
        f(&mut directives);
        extensions.insert(directives);
    }

    /// Make `names` the only headers `response` varies on.
    ///
    /// Overwrites any exclusive list set earlier on the same response.
    pub fn set_only_vary_on<B, I, S>(response: &mut Response<B>, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::update(response.extensions_mut(), |d| d.replace_only_vary_on(names));
    }

    /// Exclude `names` from the `Vary` header of `response`.
    ///
    /// Adds to any exclusions declared earlier on the same response.
    pub fn append_dont_vary_on<B, I, S>(response: &mut Response<B>, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::update(response.extensions_mut(), |d| d.extend_dont_vary_on(names));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_empty() {
        let response = Response::new(());
        assert!(VaryDirectives::of(&response).is_none());
        assert!(VaryDirectives::default().is_empty());
    }

    #[test]
    fn test_only_vary_on_last_write_wins() {
        let mut response = Response::new(());
        VaryDirectives::set_only_vary_on(&mut response, ["Cookie", "Accept"]);
        VaryDirectives::set_only_vary_on(&mut response, ["Origin"]);

        let directives = VaryDirectives::of(&response).unwrap();
        assert_eq!(directives.only_vary_on(), ["Origin"]);
        assert!(directives.dont_vary_on().is_empty());
    }

    #[test]
    fn test_dont_vary_on_accumulates() {
        let mut response = Response::new(());
        VaryDirectives::append_dont_vary_on(&mut response, ["A"]);
        VaryDirectives::append_dont_vary_on(&mut response, ["B"]);

        let directives = VaryDirectives::of(&response).unwrap();
        assert_eq!(directives.dont_vary_on(), ["A", "B"]);
    }

    #[test]
    fn test_both_kinds_coexist() {
        let mut response = Response::new(());
        VaryDirectives::append_dont_vary_on(&mut response, ["Cookie"]);
        VaryDirectives::set_only_vary_on(&mut response, ["Accept"]);

        let directives = VaryDirectives::of(&response).unwrap();
        assert_eq!(directives.only_vary_on(), ["Accept"]);
        assert_eq!(directives.dont_vary_on(), ["Cookie"]);
    }
}
