//! Hosted stand-in for the resident image.
//!
//! Off the device there is no flash tail to call into, so `send`,
//! `receive` and `enter` dispatch through whatever [`ResidentImage`] has
//! been installed here. Tests install a recording stub and check the
//! calling convention black-box.

use core::cell::Cell;

/// What a resident image looks like from the caller's side of the
/// boundary: one routine per service, same blocking semantics.
pub trait ResidentImage: Sync {
    /// Consume one unit, as `tx-byte` would.
    fn tx_byte(&self, unit: u8);

    /// Produce one unit, blocking until one is available.
    fn rx_byte(&self) -> u8;

    /// Run the loader entry. Most stubs don't care.
    fn enter(&self) {}
}

struct Slot(Cell<Option<&'static dyn ResidentImage>>);

// Safety: the cell is only touched inside critical_section::with.
unsafe impl Sync for Slot {}

static INSTALLED: Slot = Slot(Cell::new(None));

/// Install the image every trampoline call dispatches to.
///
/// Replaces any previous image; calls already in flight keep the one they
/// started with.
pub fn install(image: &'static dyn ResidentImage) {
    critical_section::with(|_| INSTALLED.0.set(Some(image)));
}

pub(crate) fn current() -> &'static dyn ResidentImage {
    // Grab the pointer inside the critical section but call through it
    // outside, so a blocking rx_byte can't wedge other threads.
    critical_section::with(|_| INSTALLED.0.get())
        .expect("no resident image installed; call tailboot::stub::install first")
}
