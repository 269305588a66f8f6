//! Inclusive ranges with an origin to shrink toward.

/// An inclusive range of values together with the value shrinks move toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range<T> {
    pub min: T,
    pub max: T,
    pub origin: T,
}

impl<T: Copy + PartialOrd> Range<T> {
    /// Range over `min..=max`, shrinking toward `min`.
    ///
    /// Bounds given in the wrong order are swapped.
    pub fn new(min: T, max: T) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Range {
            min,
            max,
            origin: min,
        }
    }

    /// Range over `min..=max`, shrinking toward `origin`.
    ///
    /// An origin outside the bounds is clamped into them.
    pub fn constant_from(origin: T, min: T, max: T) -> Self {
        let range = Range::new(min, max);
        let origin = if origin < range.min {
            range.min
        } else if origin > range.max {
            range.max
        } else {
            origin
        };
        Range { origin, ..range }
    }

    /// The range containing exactly one value.
    pub fn singleton(value: T) -> Self {
        Range {
            min: value,
            max: value,
            origin: value,
        }
    }

    /// Whether `value` lies within the bounds.
    pub fn contains(&self, value: &T) -> bool {
        *value >= self.min && *value <= self.max
    }
}
