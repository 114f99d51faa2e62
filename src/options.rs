/// What to do when the x column of the loaded data is not strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderingPolicy {
    /// Fail the load with [`Error::UnorderedKnots`](crate::Error::UnorderedKnots).
    #[default]
    Reject,
    /// Stable sort the pairs by x before building the spline. Repeated x values are still rejected.
    Sort,
}

/// What to do with a final x value that has no paired y value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DanglingValuePolicy {
    /// Discard the value and log a warning.
    #[default]
    Drop,
    /// Fail the load with [`Error::DanglingValue`](crate::Error::DanglingValue).
    Reject,
}

/// Options controlling how tabulated data is turned into an interpolated function.
///
/// # Example
/// ```
/// use tabulated_spline::{DanglingValuePolicy, LoadOptions, OrderingPolicy};
///
/// let options = LoadOptions::default()
///     .with_ordering(OrderingPolicy::Sort)
///     .with_dangling(DanglingValuePolicy::Reject);
///
/// assert_eq!(options.ordering, OrderingPolicy::Sort);
/// assert_eq!(options.dangling, DanglingValuePolicy::Reject);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOptions {
    pub ordering: OrderingPolicy,
    pub dangling: DanglingValuePolicy,
}

impl LoadOptions {
    pub fn with_ordering(mut self, ordering: OrderingPolicy) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn with_dangling(mut self, dangling: DanglingValuePolicy) -> Self {
        self.dangling = dangling;
        self
    }
}
