use std::borrow::Cow;
use std::fmt;

/// Sentinel error identified by name
///
/// Two sentinels are the same error when their names are equal. Use
/// [`Sentinel::new`] for compile-time constants and [`Sentinel::named`] for
/// names coming from configuration.
///
/// ```
/// use errata_core::Sentinel;
///
/// const NOT_FOUND: Sentinel = Sentinel::new("not_found");
/// assert_eq!(NOT_FOUND, Sentinel::named("not_found"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sentinel {
    name: Cow<'static, str>,
}

impl Sentinel {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl std::error::Error for Sentinel {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SentinelError;

    #[test]
    fn borrowed_and_owned_names_are_the_same_sentinel() {
        const NOT_FOUND: Sentinel = Sentinel::new("not_found");

        assert!(NOT_FOUND.is_same(&Sentinel::named("not_found")));
        assert!(!NOT_FOUND.is_same(&Sentinel::named("gone")));
        assert_eq!(NOT_FOUND.to_string(), "not_found");
    }
}
