//! The resident service table.
//!
//! One row per entry point the loader exports. Offsets are byte
//! displacements measured *downward* from the anchor (the start of the
//! loader's vector table) and have to stay in lock-step with the image
//! actually flashed; nothing at run time can tell when they drift. This
//! table is the only place offsets and register roles are written down —
//! the call emission in the rest of the crate is pinned to it.

/// Core registers named by the loader's register contract.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reg {
    R0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
    R12,
    Lr,
}

/// One entry point of the resident image.
///
/// Entries are constant for the life of the program; there is nothing to
/// create or tear down at run time.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServiceEntry {
    pub name: &'static str,
    /// Byte displacement below the anchor.
    pub offset: u32,
    /// Register the routine reads its argument from, if it takes one.
    /// The routine may trash it.
    pub arg: Option<Reg>,
    /// Register the routine leaves its result in, if it produces one.
    pub result: Option<Reg>,
    /// Registers the routine may trash beyond `arg`.
    pub clobbers: &'static [Reg],
}

impl ServiceEntry {
    /// Absolute call target for a given anchor placement.
    ///
    /// Moving the anchor moves every target by the same delta; the
    /// per-service displacement never changes.
    #[inline]
    pub const fn target(&self, anchor: u32) -> u32 {
        anchor.wrapping_sub(self.offset)
    }

    /// Whether `reg` is in this entry's clobber set.
    pub const fn may_clobber(&self, reg: Reg) -> bool {
        let mut i = 0;
        while i < self.clobbers.len() {
            if self.clobbers[i] as u32 == reg as u32 {
                return true;
            }
            i += 1;
        }
        false
    }
}

/// Bytes of loader code sitting below the anchor.
pub const IMAGE_SIZE: u32 = 256;

/// Hand one byte to the loader. Argument in `r2`, which the routine may
/// trash; `r4` is its scratch, `lr` is burned by the call linkage.
pub const TX_BYTE: ServiceEntry = ServiceEntry {
    name: "tx-byte",
    offset: 40,
    arg: Some(Reg::R2),
    result: None,
    clobbers: &[Reg::R4, Reg::Lr],
};

/// Block until the loader has a byte, returned in `r3`. Same scratch as
/// `tx-byte`.
pub const RX_BYTE: ServiceEntry = ServiceEntry {
    name: "rx-byte",
    offset: 80,
    arg: None,
    result: Some(Reg::R3),
    clobbers: &[Reg::R4, Reg::Lr],
};

/// The loader's own entry at the bottom of the image. No data registers;
/// it follows the full AAPCS caller-saved set.
pub const LOADER_ENTRY: ServiceEntry = ServiceEntry {
    name: "loader-entry",
    offset: IMAGE_SIZE,
    arg: None,
    result: None,
    clobbers: &[Reg::R0, Reg::R1, Reg::R2, Reg::R3, Reg::R12, Reg::Lr],
};

/// Every service the loader exports.
pub static SERVICES: [ServiceEntry; 3] = [TX_BYTE, RX_BYTE, LOADER_ENTRY];

/// Look an entry up by its name.
pub fn by_name(name: &str) -> Option<&'static ServiceEntry> {
    SERVICES.iter().find(|entry| entry.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_is_anchor_minus_offset() {
        let anchor = 0x1010_0000 - 0xc0;
        assert_eq!(TX_BYTE.target(anchor), anchor - 40);
        assert_eq!(RX_BYTE.target(anchor), anchor - 80);
        assert_eq!(LOADER_ENTRY.target(anchor), anchor - 256);
    }

    #[test]
    fn moving_the_anchor_moves_every_target_by_the_same_delta() {
        let old = 0x1010_0000 - 0xc0;
        let new = 0x1020_0000 - 0xc0;
        for entry in SERVICES.iter() {
            assert_eq!(
                entry.target(new).wrapping_sub(entry.target(old)),
                new - old,
                "{} drifted",
                entry.name
            );
        }
    }

    #[test]
    fn offsets_stay_inside_the_image() {
        for entry in SERVICES.iter() {
            assert!(entry.offset > 0, "{} has a zero offset", entry.name);
            assert!(entry.offset <= IMAGE_SIZE, "{} points past the image", entry.name);
            assert_eq!(entry.offset % 2, 0, "{} is not halfword aligned", entry.name);
        }
    }

    #[test]
    fn offsets_are_distinct() {
        for (i, a) in SERVICES.iter().enumerate() {
            for b in SERVICES.iter().skip(i + 1) {
                assert_ne!(a.offset, b.offset, "{} and {} collide", a.name, b.name);
            }
        }
    }

    #[test]
    fn data_registers_are_never_in_the_clobber_set() {
        for entry in SERVICES.iter() {
            if let Some(arg) = entry.arg {
                assert!(!entry.may_clobber(arg), "{} clobbers its argument", entry.name);
            }
            if let Some(result) = entry.result {
                assert!(!entry.may_clobber(result), "{} clobbers its result", entry.name);
            }
        }
    }

    #[test]
    fn the_call_linkage_register_is_always_declared() {
        for entry in SERVICES.iter() {
            assert!(entry.may_clobber(Reg::Lr), "{} hides the lr clobber", entry.name);
        }
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(by_name("tx-byte").map(|e| e.offset), Some(40));
        assert_eq!(by_name("rx-byte").map(|e| e.offset), Some(80));
        assert!(by_name("flash-page").is_none());
    }
}
