//! Client side of a boot loader resident in the tail of RP2040 flash.
//!
//! `tailboot` is the application half of a two-image setup: a tiny loader
//! sits in the last 448 bytes of flash and the application reaches its
//! services without knowing a single absolute address. The loader publishes
//! each service as a fixed byte offset below the start of its own vector
//! table, and every call here is a pc-relative `bl` against that one anchor
//! symbol, resolved at link time.
//!
//! Two byte-sized primitives cross the boundary, [`send`] and [`receive`],
//! each one call in, one value out, carried in registers. There is no
//! framing, no error detection and no flow control at this level; anything
//! that wants those builds them on top. [`serial::LoaderPort`] dresses the
//! same two calls up as an embedded-hal serial port.
//!
//! # Memory layout
//!
//! The application's `memory.x` must keep the resident region free and
//! place the anchor:
//!
//! ```text
//! MEMORY
//! {
//!     /* last 448 bytes of flash belong to the resident loader */
//!     FLASH : ORIGIN = 0x10000000, LENGTH = 1024K - 448
//! }
//! PROVIDE(__resident_vectors = 0x10000000 + 1024K - 0xC0);
//! ```
//!
//! # Safety
//! The offsets in [`service`] have to match the loader image actually in
//! flash. Nothing can check that at run time; a mismatch calls into the
//! middle of whatever else lives up there.

#![no_std]

pub mod serial;
pub mod service;
#[cfg(not(target_os = "none"))]
pub mod stub;
mod trampoline;

pub use trampoline::{enter, receive, send};

#[cfg(target_os = "none")]
pub use cortex_m_rt as rt;
#[cfg(feature = "defmt")]
pub use defmt;
