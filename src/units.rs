//! Minute-based time axis.
//!
//! Every schedule in this crate is discretised into fixed one-minute steps
//! counted from the schedule start. Durations that callers naturally express
//! in other time units (seconds, hours) are converted onto this axis through
//! [`to_steps`], which is compile-time restricted to time quantities by the
//! [`SameDim`] bound.

use qtty::{Minute, Quantity, Unit};

/// Zero-based offset, in whole minutes, from the schedule start.
pub type Step = usize;

/// Marker trait for units that share the same physical dimension.
///
/// Automatically implemented for any pair of units where `From::Dim == To::Dim`,
/// so `Second: SameDim<Minute>` holds while `Meter: SameDim<Minute>` does not.
pub trait SameDim<To: Unit>: Unit<Dim = To::Dim> {}

impl<From, To> SameDim<To> for From
where
    From: Unit,
    To: Unit<Dim = From::Dim>,
{
}

/// Converts a quantity from one unit to another unit of the same dimension.
#[inline]
pub fn convert<From, To>(q: Quantity<From>) -> Quantity<To>
where
    From: SameDim<To>,
    To: Unit,
{
    q.to::<To>()
}

/// Number of whole steps covered by `duration`, truncated toward zero.
///
/// Negative and NaN durations map to zero steps.
pub fn to_steps<U>(duration: Quantity<U>) -> Step
where
    U: SameDim<Minute>,
{
    let minutes: Quantity<Minute> = convert(duration);
    let value = minutes.value();
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        value.trunc() as Step
    }
}
