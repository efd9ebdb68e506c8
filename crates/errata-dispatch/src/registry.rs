use std::error::Error;
use std::fmt;

use errata_core::SentinelError;

use crate::{ErrorDescriptor, RegistryError, Validate};

/// Caller-supplied association of sentinel errors to descriptor templates
///
/// Behaves as a map keyed by sentinel identity: inserting a sentinel that
/// is already present replaces its template.
#[derive(Default)]
pub struct ErrorTable {
    entries: Vec<(Box<dyn SentinelError>, ErrorDescriptor)>,
}

impl ErrorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `sentinel` with `template`, replacing any previous template
    pub fn insert(&mut self, sentinel: impl SentinelError, template: ErrorDescriptor) {
        self.insert_boxed(Box::new(sentinel), template);
    }

    fn insert_boxed(&mut self, sentinel: Box<dyn SentinelError>, template: ErrorDescriptor) {
        let existing = self
            .entries
            .iter_mut()
            .find(|(key, _)| key.is_same(sentinel.as_error()));

        match existing {
            Some((_, slot)) => *slot = template,
            None => self.entries.push((sentinel, template)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: SentinelError> FromIterator<(S, ErrorDescriptor)> for ErrorTable {
    fn from_iter<I: IntoIterator<Item = (S, ErrorDescriptor)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<S: SentinelError> Extend<(S, ErrorDescriptor)> for ErrorTable {
    fn extend<I: IntoIterator<Item = (S, ErrorDescriptor)>>(&mut self, iter: I) {
        for (sentinel, template) in iter {
            self.insert(sentinel, template);
        }
    }
}

impl fmt::Debug for ErrorTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(key, value)| (key.to_string(), value)))
            .finish()
    }
}

/// Immutable association of sentinels to pre-rendered descriptors
///
/// Every descriptor, including the generic fallback, carries its payload
/// from construction on, so dispatching a known error never serializes.
/// A registry is never mutated after [`Registry::build`] returns, which
/// makes concurrent lookups lock-free.
pub struct Registry {
    entries: Vec<(Box<dyn SentinelError>, ErrorDescriptor)>,
    generic: ErrorDescriptor,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Validate and pre-render every template in `table`
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Validation`] for the first template the
    /// validator rejects and [`RegistryError::Serialization`] for a template
    /// that cannot be rendered. Nothing is kept on failure.
    pub fn build(table: ErrorTable, validator: Option<&dyn Validate>) -> Result<Self, RegistryError> {
        let generic = render(ErrorDescriptor::generic())?;

        let mut entries = Vec::with_capacity(table.len());
        for (sentinel, template) in table.entries {
            if let Some(validator) = validator
                && let Err(source) = validator.validate(&template)
            {
                return Err(RegistryError::Validation {
                    descriptor: template,
                    source,
                });
            }

            entries.push((sentinel, render(template)?));
        }

        tracing::debug!(entries = entries.len(), "error registry built");

        Ok(Self { entries, generic })
    }

    /// Find the descriptor of the registered sentinel `err` is or wraps
    ///
    /// When an error chain contains several registered sentinels, which
    /// one wins is unspecified.
    pub fn lookup(&self, err: &(dyn Error + 'static)) -> Option<&ErrorDescriptor> {
        self.entries
            .iter()
            .find(|(sentinel, _)| sentinel.is_in_chain(err))
            .map(|(_, descriptor)| descriptor)
    }

    /// Descriptor registered for exactly `sentinel`, ignoring wrapped causes
    pub fn get(&self, sentinel: &(dyn Error + 'static)) -> Option<&ErrorDescriptor> {
        self.entries
            .iter()
            .find(|(key, _)| key.is_same(sentinel))
            .map(|(_, descriptor)| descriptor)
    }

    /// The pre-rendered fallback descriptor
    pub const fn generic(&self) -> &ErrorDescriptor {
        &self.generic
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(dyn Error + 'static), &ErrorDescriptor)> {
        self.entries
            .iter()
            .map(|(sentinel, descriptor)| (sentinel.as_error(), descriptor))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("entries", &self.entries.len())
            .field("generic", &self.generic)
            .finish()
    }
}

fn render(template: ErrorDescriptor) -> Result<ErrorDescriptor, RegistryError> {
    match template.render() {
        Ok(payload) => Ok(template.with_payload(payload)),
        Err(source) => Err(RegistryError::Serialization {
            descriptor: template,
            source,
        }),
    }
}

/// Incremental construction of a [`Registry`]
#[derive(Default)]
#[must_use]
pub struct RegistryBuilder {
    table: ErrorTable,
    validator: Option<Box<dyn Validate>>,
}

impl RegistryBuilder {
    pub fn register(mut self, sentinel: impl SentinelError, template: ErrorDescriptor) -> Self {
        self.table.insert(sentinel, template);
        self
    }

    pub fn table(mut self, table: ErrorTable) -> Self {
        for (sentinel, template) in table.entries {
            self.table.insert_boxed(sentinel, template);
        }
        self
    }

    /// Reject templates that fail `validator`
    pub fn validator(mut self, validator: impl Validate + 'static) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    /// # Errors
    ///
    /// See [`Registry::build`]
    pub fn build(self) -> Result<Registry, RegistryError> {
        Registry::build(self.table, self.validator.as_deref())
    }
}
