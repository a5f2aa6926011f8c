// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scalar abstraction used by the virtualizers.
//!
//! Only implemented for `f32` and `f64`.

use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Sub};

/// Scalar type used for extents, offsets, and scroll positions.
pub trait Scalar:
    Copy
    + PartialOrd
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// Additive identity (typically `0.0`).
    fn zero() -> Self;

    /// Returns the maximum of `self` and `other`.
    fn max(self, other: Self) -> Self;

    /// Returns the minimum of `self` and `other`.
    fn min(self, other: Self) -> Self;

    /// Returns `true` if the value is finite (not NaN or infinite).
    fn is_finite(self) -> bool;

    /// Constructs from a `usize` lossily.
    fn from_usize(value: usize) -> Self;

    /// Halves the value.
    fn half(self) -> Self;

    /// Floors the value and converts it to an index.
    ///
    /// Negative and non-finite values map to `0`; callers clamp the result to
    /// a valid index range afterwards.
    fn floor_to_usize(self) -> usize;

    /// Rounds the value up and converts it to an index, like
    /// [`Scalar::floor_to_usize`].
    fn ceil_to_usize(self) -> usize;

    /// Returns `true` if the value is finite and strictly positive.
    fn is_positive_finite(self) -> bool {
        self.is_finite() && self > Self::zero()
    }

    /// Clamps negative and non-finite values to zero.
    fn clamp_non_negative(self) -> Self {
        if self.is_finite() && self > Self::zero() {
            self
        } else {
            Self::zero()
        }
    }
}

macro_rules! impl_scalar {
    ($ty:ty, $floor:path, $ceil:path) => {
        impl Scalar for $ty {
            fn zero() -> Self {
                0.0
            }

            fn max(self, other: Self) -> Self {
                Self::max(self, other)
            }

            fn min(self, other: Self) -> Self {
                Self::min(self, other)
            }

            fn is_finite(self) -> bool {
                Self::is_finite(self)
            }

            fn from_usize(value: usize) -> Self {
                value as Self
            }

            fn half(self) -> Self {
                self * 0.5
            }

            fn floor_to_usize(self) -> usize {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "Used only for index approximation; result is clamped immediately after"
                )]
                {
                    $floor(self.clamp_non_negative()) as usize
                }
            }

            fn ceil_to_usize(self) -> usize {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "Used only for index approximation; result is clamped immediately after"
                )]
                {
                    $ceil(self.clamp_non_negative()) as usize
                }
            }
        }
    };
}

impl_scalar!(f32, libm::floorf, libm::ceilf);
impl_scalar!(f64, libm::floor, libm::ceil);
