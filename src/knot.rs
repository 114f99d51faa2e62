/// Knot represents one tabulated sample through which the spline passes.
/// - `x` - argument,
/// - `y` - function value at `x`.
#[derive(Debug, Clone, Copy)]
pub struct Knot {
    pub(crate) x: f64,
    pub(crate) y: f64,
}

impl Knot {
    /// # Example
    /// ```
    /// use tabulated_spline::Knot;
    ///
    /// let knot = Knot::new(1.0, 2.0);
    /// assert_eq!(1.0, knot.get_x());
    /// assert_eq!(2.0, knot.get_y());
    /// ```
    pub fn new(x: f64, y: f64) -> Self {
        Knot { x, y }
    }

    /// Builds knots from paired argument and value columns. Extra entries of the longer column
    /// are ignored.
    pub fn from_columns(xs: &[f64], ys: &[f64]) -> Vec<Knot> {
        xs.iter()
            .zip(ys.iter())
            .map(|(x, y)| Knot::new(*x, *y))
            .collect()
    }

    pub fn get_x(&self) -> f64 {
        self.x
    }

    pub fn get_y(&self) -> f64 {
        self.y
    }
}

impl Ord for Knot {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.x.total_cmp(&other.x)
    }
}

impl PartialOrd for Knot {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Knot {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x
    }
}

impl Eq for Knot {}
