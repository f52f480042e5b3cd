//! Scalar kinds the dense kernels are generic over.
//!
//! Four kinds are supported: `f32`, `f64`, `Complex<f32>` and `Complex<f64>`.
//! Kernels are written once against [`Scalar`] and monomorphized per kind,
//! so inner loops carry no dynamic dispatch.

use num_complex::Complex;
use num_traits::{Float, NumAssign, Zero};
use std::fmt::{Debug, Display};
use std::ops::{Add, AddAssign, Mul, Sub};

/// Capability set shared by real and complex scalars.
pub trait Scalar:
    Copy
    + Debug
    + PartialEq
    + Send
    + Sync
    + 'static
    + Zero
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + AddAssign
{
    /// Underlying real type (`f32` or `f64`).
    type Real: RealScalar;

    /// Complex conjugate. Identity for real kinds.
    fn conjugate(self) -> Self;

    /// Real component.
    fn real(self) -> Self::Real;

    /// Imaginary component. Zero for real kinds.
    fn imag(self) -> Self::Real;

    /// Magnitude: `|x|` for reals, `sqrt(re^2 + im^2)` for complex.
    fn norm(self) -> Self::Real;

    /// Squared magnitude without the square root.
    fn norm_squared(self) -> Self::Real;

    /// Embed a real value.
    fn from_real(re: Self::Real) -> Self;
}

/// Real floating-point kinds. These are the only kinds the SVD solver accepts.
pub trait RealScalar: Scalar<Real = Self> + Float + NumAssign + Display {
    /// LAPACK precision prefix of the routine family (`"s"` or `"d"`).
    const PREFIX: &'static str;
}

// ============================================================================
// Real kinds
// ============================================================================

macro_rules! impl_real_scalar {
    ($t:ty, $prefix:literal) => {
        impl Scalar for $t {
            type Real = $t;

            #[inline(always)]
            fn conjugate(self) -> Self {
                self
            }

            #[inline(always)]
            fn real(self) -> Self {
                self
            }

            #[inline(always)]
            fn imag(self) -> Self {
                0.0
            }

            #[inline(always)]
            fn norm(self) -> Self {
                self.abs()
            }

            #[inline(always)]
            fn norm_squared(self) -> Self {
                self * self
            }

            #[inline(always)]
            fn from_real(re: Self) -> Self {
                re
            }
        }

        impl RealScalar for $t {
            const PREFIX: &'static str = $prefix;
        }
    };
}

impl_real_scalar!(f32, "s");
impl_real_scalar!(f64, "d");

// ============================================================================
// Complex kinds: (re, im) pairs
// ============================================================================

impl<T: RealScalar> Scalar for Complex<T> {
    type Real = T;

    #[inline(always)]
    fn conjugate(self) -> Self {
        Complex::new(self.re, -self.im)
    }

    #[inline(always)]
    fn real(self) -> T {
        self.re
    }

    #[inline(always)]
    fn imag(self) -> T {
        self.im
    }

    #[inline(always)]
    fn norm(self) -> T {
        (self.re * self.re + self.im * self.im).sqrt()
    }

    #[inline(always)]
    fn norm_squared(self) -> T {
        self.re * self.re + self.im * self.im
    }

    #[inline(always)]
    fn from_real(re: T) -> Self {
        Complex::new(re, T::zero())
    }
}

// ============================================================================
// Free-function forms
// ============================================================================

/// Complex conjugate of `x`.
#[inline(always)]
pub fn conjugate<T: Scalar>(x: T) -> T {
    x.conjugate()
}

/// Real component of `x`.
#[inline(always)]
pub fn real<T: Scalar>(x: T) -> T::Real {
    x.real()
}

/// Imaginary component of `x`.
#[inline(always)]
pub fn imag<T: Scalar>(x: T) -> T::Real {
    x.imag()
}

/// Magnitude of `x`.
#[inline(always)]
pub fn norm<T: Scalar>(x: T) -> T::Real {
    x.norm()
}

/// Squared magnitude of `x`.
#[inline(always)]
pub fn norm_squared<T: Scalar>(x: T) -> T::Real {
    x.norm_squared()
}
