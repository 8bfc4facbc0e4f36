//! Decoding helpers for stored column values.

use log::warn;

/// Decode a stored column with `parse`, falling back to the default.
///
/// Unparseable values are logged. The default is written back on the next save.
pub(crate) fn stored<T: Default>(
    raw: &str,
    column: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> T {
    parse(raw).unwrap_or_else(|| {
        warn!("Unreadable value '{}' in {}, using the default", raw, column);
        T::default()
    })
}
