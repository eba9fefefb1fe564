//! Per-axis boundary conditions.

/// How one axis of a [`Region`](crate::Region) treats positions and
/// separations at its edges.
///
/// # Examples
///
/// ```
/// use latdef_core::Boundary;
///
/// // Periodic: separations use the nearest image.
/// assert_eq!(Boundary::Periodic.minimum_image(9.0, 10.0), -1.0);
/// // Bounded: separations are taken as-is.
/// assert_eq!(Boundary::Bounded.minimum_image(9.0, 10.0), 9.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// The axis ends at the region bounds; nothing wraps.
    #[default]
    Bounded,
    /// The axis is cyclic with period equal to its cell length.
    Periodic,
}

impl Boundary {
    /// Map a legacy integer flag (`0` bounded, non-zero periodic).
    pub fn from_flag(flag: i32) -> Self {
        if flag == 0 {
            Self::Bounded
        } else {
            Self::Periodic
        }
    }

    /// Whether the axis wraps.
    pub fn is_periodic(self) -> bool {
        self == Self::Periodic
    }

    /// Reduce a one-axis separation `delta` to its nearest periodic image.
    ///
    /// Subtracts `round(delta / cell_length) * cell_length` on periodic
    /// axes and returns `delta` unchanged on bounded ones.
    pub fn minimum_image(self, delta: f64, cell_length: f64) -> f64 {
        match self {
            Self::Periodic => delta - (delta / cell_length).round() * cell_length,
            Self::Bounded => delta,
        }
    }
}
