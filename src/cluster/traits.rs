/// Common interface for grouping strategies (one group per item).
///
/// Strategies work on indices only: `similar(i, j)` answers whether item `i`
/// and item `j` are duplicates, with `i < j`. Each call may be expensive
/// (an API request behind the predicate), so strategies avoid calls whose
/// answer cannot change the result.
pub trait Grouping {
    /// Partition `0..n` into groups.
    ///
    /// Every index appears in exactly one group. Groups are non-empty, and
    /// members are listed in ascending input order.
    fn group(&self, n: usize, similar: &mut dyn FnMut(usize, usize) -> bool) -> Vec<Vec<usize>>;
}
