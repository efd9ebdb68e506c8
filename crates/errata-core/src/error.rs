use std::error::Error;

/// Identity capability for errors used as registry keys
///
/// A sentinel recognizes itself inside an arbitrary error value, either as
/// the value itself or as one of its wrapped causes. Any error type that
/// implements `PartialEq` is a sentinel through the blanket impl, so unit
/// structs, enums and [`crate::Sentinel`] all work as keys.
pub trait SentinelError: Error + Send + Sync + 'static {
    /// Whether `other` is the same error as this sentinel
    fn is_same(&self, other: &(dyn Error + 'static)) -> bool;

    /// View this sentinel as a plain error
    fn as_error(&self) -> &(dyn Error + 'static);

    /// Whether `err` equals this sentinel or wraps it anywhere in its chain
    fn is_in_chain(&self, err: &(dyn Error + 'static)) -> bool {
        chain(err).any(|cause| self.is_same(cause))
    }
}

impl<E> SentinelError for E
where
    E: Error + PartialEq + Send + Sync + 'static,
{
    fn is_same(&self, other: &(dyn Error + 'static)) -> bool {
        other.downcast_ref::<E>().is_some_and(|other| other == self)
    }

    fn as_error(&self) -> &(dyn Error + 'static) {
        self
    }
}

/// Walk an error and its causes, outermost first
pub fn chain<'a>(err: &'a (dyn Error + 'static)) -> impl Iterator<Item = &'a (dyn Error + 'static)> {
    std::iter::successors(Some(err), |e| (*e).source())
}
