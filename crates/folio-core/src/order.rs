//! Gap-free sequential order assignment for chapters and parts.
//!
//! Sibling units carry a 1-based `order` that must stay unique within the
//! parent scope. Deleting a unit frees its position; the next creation fills
//! the lowest free position before extending past the current maximum.

use crate::api::ContentApi;
use crate::model::SiblingScope;

/// Compute the order value for a new sibling unit.
///
/// Scans the existing orders in ascending order and returns the first value
/// missing from the contiguous run starting at 1, or `len + 1` when there is
/// no gap. An empty input yields 1.
pub fn next_order(existing: &[u32]) -> u32 {
    let mut sorted = existing.to_vec();
    sorted.sort_unstable();

    for (i, &value) in sorted.iter().enumerate() {
        let expected = i as u32 + 1;
        if value != expected {
            return expected;
        }
    }

    sorted.len() as u32 + 1
}

/// Fetch the sibling listing (unpublished included) and derive the order to
/// propose for a new unit.
///
/// The result is computed fresh from the listing on every call and must not
/// be cached across form loads. A failed fetch degrades to proposing 1 rather
/// than blocking creation; the server remains the final arbiter of order
/// assignment at persistence time.
pub async fn propose_order<A>(api: &A, parent_id: &str, scope: SiblingScope) -> u32
where
    A: ContentApi + ?Sized,
{
    match api.list_siblings(parent_id, scope, true).await {
        Ok(siblings) => {
            let orders: Vec<u32> = siblings.iter().map(|s| s.order).collect();
            next_order(&orders)
        }
        Err(err) => {
            crate::verbose!("sibling listing for {parent_id} failed, proposing order 1: {err}");
            1
        }
    }
}
