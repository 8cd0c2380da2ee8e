/// Decides whether two snapshots represent the same state.
///
/// Implemented for [`ValueEq`] (structural `PartialEq`) and for any
/// `Fn(&T, &T) -> bool`, so snapshot types without `PartialEq`, or types
/// where only some fields matter, can still be deduplicated.
pub trait SnapshotEq<T> {
    fn same(&self, a: &T, b: &T) -> bool;
}

/// Compares snapshots with their `PartialEq` implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueEq;

impl<T: PartialEq> SnapshotEq<T> for ValueEq {
    fn same(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

impl<T, F> SnapshotEq<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    fn same(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}
