//! The two predicates every constraint in the system is built from.

use super::caregiver::Caregiver;
use super::visit::Visit;

/// Returns true if the visits' `[start, end)` intervals intersect.
///
/// Back-to-back visits (`a.end == b.start`) do not overlap. Symmetric.
///
/// ```
/// use careroster_core::{overlaps, Visit};
///
/// let a = Visit::parse("A", "2025-06-23 10:00", "2025-06-23 12:00", "C", "s", "n").unwrap();
/// let b = Visit::parse("B", "2025-06-23 11:00", "2025-06-23 13:00", "C", "s", "n").unwrap();
/// assert!(overlaps(&a, &b) && overlaps(&b, &a));
/// ```
#[inline]
pub fn overlaps(a: &Visit, b: &Visit) -> bool {
    a.start() < b.end() && b.start() < a.end()
}

/// Returns true if some availability window of the caregiver, on the
/// visit's weekday, contains the whole visit.
///
/// Skills are not considered; see [`Caregiver::can_serve`].
#[inline]
pub fn is_available(caregiver: &Caregiver, visit: &Visit) -> bool {
    caregiver.is_available(visit)
}
