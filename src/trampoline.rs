//! Call emission for the resident service table.
//!
//! Each primitive is exactly one relative call against the link-time
//! anchor, nothing kept across calls. The `asm!` blocks cannot read the
//! table at run time, so const assertions hold the hand-written register
//! pins and the table in lock-step; the offsets themselves are fed straight
//! from the table through `const` operands.

#[cfg(all(target_os = "none", not(target_arch = "arm")))]
compile_error!("the resident loader's call convention is only defined for Cortex-M targets");

#[cfg(all(target_arch = "arm", target_os = "none"))]
mod emit {
    use core::arch::asm;

    use crate::service::{Reg, LOADER_ENTRY, RX_BYTE, TX_BYTE};

    extern "C" {
        // Start of the resident loader's vector table. memory.x places it:
        //   PROVIDE(__resident_vectors = ORIGIN(FLASH) + LENGTH(FLASH) - 0xC0);
        fn __resident_vectors();
    }

    // Register pins below must match the table.
    const _: () = assert!(matches!(TX_BYTE.arg, Some(Reg::R2)));
    const _: () = assert!(TX_BYTE.may_clobber(Reg::R4) && TX_BYTE.may_clobber(Reg::Lr));
    const _: () = assert!(matches!(RX_BYTE.result, Some(Reg::R3)));
    const _: () = assert!(RX_BYTE.may_clobber(Reg::R4) && RX_BYTE.may_clobber(Reg::Lr));
    const _: () = assert!(LOADER_ENTRY.may_clobber(Reg::R12));

    #[inline]
    pub fn send(unit: u8) {
        unsafe {
            asm!(
                "bl {vectors} - {off}",
                vectors = sym __resident_vectors,
                off = const TX_BYTE.offset,
                inout("r2") unit as u32 => _,
                out("r4") _,
                lateout("lr") _,
            );
        }
    }

    #[inline]
    pub fn receive() -> u8 {
        let unit: u32;
        unsafe {
            asm!(
                "bl {vectors} - {off}",
                vectors = sym __resident_vectors,
                off = const RX_BYTE.offset,
                out("r3") unit,
                out("r4") _,
                lateout("lr") _,
            );
        }
        unit as u8
    }

    pub unsafe fn enter() {
        cortex_m::interrupt::disable();
        asm!(
            "bl {vectors} - {off}",
            vectors = sym __resident_vectors,
            off = const LOADER_ENTRY.offset,
            clobber_abi("C"),
        );
        // The loader may have rewritten flash behind the prefetcher.
        cortex_m::asm::dsb();
        cortex_m::asm::isb();
        cortex_m::interrupt::enable();
    }
}

#[cfg(not(target_os = "none"))]
mod emit {
    use crate::stub;

    #[inline]
    pub fn send(unit: u8) {
        stub::current().tx_byte(unit)
    }

    #[inline]
    pub fn receive() -> u8 {
        stub::current().rx_byte()
    }

    pub unsafe fn enter() {
        stub::current().enter()
    }
}

/// Hand one byte to the loader's `tx-byte` service.
///
/// The unit goes out in the argument register and this returns once the
/// resident routine has consumed it. Exactly one call per invocation; no
/// retry, no buffering. If the routine never returns, neither does this.
#[inline]
pub fn send(unit: u8) {
    emit::send(unit)
}

/// Pull one byte from the loader's `rx-byte` service.
///
/// Blocks for as long as the resident routine does and returns whatever it
/// left in the result register, verbatim.
#[inline]
pub fn receive() -> u8 {
    emit::receive()
}

/// Transfer control to the loader entry at the bottom of the image.
///
/// The loader takes over the serial line and returns only if it declines
/// to; accepting an update usually ends in a reset instead. Interrupts are
/// masked across the call and the instruction stream is resynchronized
/// afterwards, since the loader may have rewritten flash.
///
/// # Safety
/// Re-enables interrupts on return and runs foreign code with the full
/// AAPCS clobber set; the caller must be at a point where both are fine.
pub unsafe fn enter() {
    #[cfg(feature = "defmt")]
    defmt::info!("tailboot: handing over to the resident loader");
    emit::enter()
}
