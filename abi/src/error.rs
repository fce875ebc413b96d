//! Error codes for framebuffer bring-up.

use core::ffi::c_int;

/// Implement common methods for driver error enums.
///
/// Generates `as_c_int()`, `from_c_int()`, `is_success()`, and `is_error()` methods
/// for `#[repr(i32)]` error enums that follow the kernel's error convention.
macro_rules! impl_kernel_error {
    ($ty:ty, fallback: $fallback:ident, variants: { $($val:literal => $variant:ident),* $(,)? }) => {
        impl $ty {
            /// Convert to C-style integer for the probe return path.
            #[inline]
            pub fn as_c_int(self) -> c_int {
                self as c_int
            }

            /// Convert from C-style integer.
            #[inline]
            pub fn from_c_int(val: c_int) -> Self {
                match val {
                    $($val => Self::$variant,)*
                    _ => Self::$fallback,
                }
            }

            /// Check if this is a success result.
            #[inline]
            pub fn is_success(self) -> bool {
                matches!(self, Self::Success)
            }

            /// Check if this is an error result.
            #[inline]
            pub fn is_error(self) -> bool {
                !self.is_success()
            }
        }
    };
}

/// Framebuffer operation result type
pub type FbResult<T> = Result<T, FbError>;

/// Errors returned while bringing up or operating the video pipeline.
///
/// Every variant is terminal for the bring-up attempt that produced it.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FbError {
    /// Operation succeeded
    #[default]
    Success = 0,
    /// A required register region or platform resource is missing
    ResourceUnavailable = -1,
    /// The register region exists but could not be mapped
    MappingFailure = -2,
    /// Coherent frame memory could not be allocated
    OutOfMemory = -3,
    /// The clock generator still reported running after a stop request
    ClockStopTimeout = -4,
    /// The clock generator did not report running after a start request
    ClockLockTimeout = -5,
    /// Handing the framebuffer to the display consumer failed
    RegistrationFailure = -6,
    /// Invalid argument (palette index, missing configuration)
    InvalidArgument = -7,
}

impl_kernel_error!(FbError, fallback: InvalidArgument, variants: {
    0 => Success,
    -1 => ResourceUnavailable,
    -2 => MappingFailure,
    -3 => OutOfMemory,
    -4 => ClockStopTimeout,
    -5 => ClockLockTimeout,
    -6 => RegistrationFailure,
    -7 => InvalidArgument,
});

impl FbError {
    /// Short human-readable description used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::ResourceUnavailable => "no memory resource",
            Self::MappingFailure => "failed to map device memory",
            Self::OutOfMemory => "out of memory",
            Self::ClockStopTimeout => "failed to stop dynamic clock",
            Self::ClockLockTimeout => "failed to start dynamic clock",
            Self::RegistrationFailure => "could not register frame buffer",
            Self::InvalidArgument => "invalid argument",
        }
    }
}

impl core::fmt::Display for FbError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
