//! Math function wrappers for std/no_std compatibility
//!
//! Uses standard library math when available, falls back to libm for no_std.

#[cfg(feature = "std")]
#[inline]
pub fn sqrt(x: f64) -> f64 {
    x.sqrt()
}

#[cfg(not(feature = "std"))]
#[inline]
pub fn sqrt(x: f64) -> f64 {
    libm::sqrt(x)
}

#[cfg(feature = "std")]
#[inline]
pub fn abs(x: f64) -> f64 {
    x.abs()
}

#[cfg(not(feature = "std"))]
#[inline]
pub fn abs(x: f64) -> f64 {
    libm::fabs(x)
}

#[cfg(feature = "std")]
#[inline]
pub fn trunc(x: f64) -> f64 {
    x.trunc()
}

#[cfg(not(feature = "std"))]
#[inline]
pub fn trunc(x: f64) -> f64 {
    libm::trunc(x)
}

/// True when `x` is finite and has no fractional part
#[inline]
pub fn is_integral(x: f64) -> bool {
    x.is_finite() && trunc(x) == x
}
