//! SIMD-optimized checksum with graceful fallback
//!
//! Provides the vectorized digest with runtime CPU feature detection:
//! - AVX2 (x86_64)
//! - NEON (aarch64)
//! - Scalar fallback (all platforms)
//!
//! Every engine produces the identical digest for the same bytes.

pub mod checksum;

pub use checksum::{Checksum, Engine};
