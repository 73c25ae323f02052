//! Optional derived values.

/// A derived quantity that may be undefined.
///
/// Derivatives cannot be computed for the first sample of a track or across a
/// zero-length time step. Instead of encoding that as `NaN` or `0.0`, such
/// positions hold [`Metric::NotAvailable`].
///
/// # Example
///
/// ```
/// use motion_types::Metric;
///
/// let v = Metric::Available(2.0_f64);
/// assert_eq!(v.map(|x| x * 2.0), Metric::Available(4.0));
///
/// let missing: Metric<f64> = Metric::NotAvailable;
/// assert_eq!(missing.map(|x| x * 2.0), Metric::NotAvailable);
/// assert_eq!(missing.unwrap_or(-1.0), -1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Metric<T> {
    /// A computed value.
    Available(T),
    /// The value is undefined at this position.
    #[default]
    NotAvailable,
}

impl<T> Metric<T> {
    /// Returns true if a value is present.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// Returns true if the value is undefined.
    #[must_use]
    pub const fn is_not_available(&self) -> bool {
        matches!(self, Self::NotAvailable)
    }

    /// Converts to an [`Option`].
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Available(v) => Some(v),
            Self::NotAvailable => None,
        }
    }

    /// Borrows the contained value.
    #[must_use]
    pub const fn as_ref(&self) -> Metric<&T> {
        match self {
            Self::Available(v) => Metric::Available(v),
            Self::NotAvailable => Metric::NotAvailable,
        }
    }

    /// Maps the contained value.
    #[must_use]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Metric<U> {
        match self {
            Self::Available(v) => Metric::Available(f(v)),
            Self::NotAvailable => Metric::NotAvailable,
        }
    }

    /// Chains a computation that may itself be undefined.
    #[must_use]
    pub fn and_then<U, F: FnOnce(T) -> Metric<U>>(self, f: F) -> Metric<U> {
        match self {
            Self::Available(v) => f(v),
            Self::NotAvailable => Metric::NotAvailable,
        }
    }

    /// Combines two metrics; the result is available only if both are.
    #[must_use]
    pub fn zip<U>(self, other: Metric<U>) -> Metric<(T, U)> {
        match (self, other) {
            (Self::Available(a), Metric::Available(b)) => Metric::Available((a, b)),
            _ => Metric::NotAvailable,
        }
    }

    /// Returns the value or the given default.
    #[must_use]
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Available(v) => v,
            Self::NotAvailable => default,
        }
    }
}

impl<T: Copy> Metric<T> {
    /// Returns a copy of the value, if present.
    #[must_use]
    pub const fn value(&self) -> Option<T> {
        match self {
            Self::Available(v) => Some(*v),
            Self::NotAvailable => None,
        }
    }
}

impl Metric<f64> {
    /// Wraps a float, treating non-finite values as not available.
    #[must_use]
    pub const fn from_finite(value: f64) -> Self {
        if value.is_finite() {
            Self::Available(value)
        } else {
            Self::NotAvailable
        }
    }
}

impl<T> From<Option<T>> for Metric<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::NotAvailable, Self::Available)
    }
}

impl<T> From<Metric<T>> for Option<T> {
    fn from(value: Metric<T>) -> Self {
        value.into_option()
    }
}

// Serialized as an explicit `null` rather than being skipped, so consumers
// never see a missing field where a value was expected.
#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Metric<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Available(v) => serializer.serialize_some(v),
            Self::NotAvailable => serializer.serialize_none(),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for Metric<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}
