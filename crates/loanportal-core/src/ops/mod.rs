//! Resource CRUD operations.
//!
//! Each operation takes the current registry snapshot by reference and
//! returns the next one. Validation failures return the error and no
//! snapshot, so the caller's registry is unchanged. Operations on an id
//! that does not exist are no-ops: they hand back an unchanged snapshot and
//! report the miss through their return value rather than an error.

pub mod api_keys;
pub mod ip_allowlist;
pub mod webhooks;

/// Split `items` into the record matching `id` and everything else.
///
/// Returns `None` when no record matches.
pub(crate) fn take_by_id<T: Clone>(
    items: &[T],
    id: &str,
    id_of: impl Fn(&T) -> &str,
) -> Option<(Vec<T>, T)> {
    let pos = items.iter().position(|item| id_of(item) == id)?;
    let mut rest = items.to_vec();
    let taken = rest.remove(pos);
    Some((rest, taken))
}

/// Replace the record matching `id` with `update(record)`.
///
/// Returns `None` when no record matches.
pub(crate) fn update_by_id<T: Clone>(
    items: &[T],
    id: &str,
    id_of: impl Fn(&T) -> &str,
    update: impl FnOnce(&T) -> T,
) -> Option<(Vec<T>, T)> {
    let pos = items.iter().position(|item| id_of(item) == id)?;
    let mut next = items.to_vec();
    let updated = update(&items[pos]);
    next[pos] = updated.clone();
    Some((next, updated))
}
