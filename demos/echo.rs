//! Echoes every byte back through the resident loader's console.
//!
//! Nothing here touches a UART register; the loader owns the line and we
//! only ever cross the call boundary at the tail of flash.
#![no_std]
#![no_main]

use core::fmt::Write;

use defmt_rtt as _;
use panic_probe as _;

use embedded_hal::serial::{Read, Write as SerialWrite};
use nb::block;

use tailboot::rt::entry;
use tailboot::serial::LoaderPort;

#[link_section = ".boot_loader"]
#[used]
pub static BOOT_LOADER: [u8; 256] = rp2040_boot2::BOOT_LOADER_W25Q080;

#[entry]
fn main() -> ! {
    defmt::info!("echo: up");

    let mut port = LoaderPort::new();
    let _ = writeln!(port, "echo ready");

    loop {
        let unit = block!(port.read()).unwrap();
        block!(port.write(unit)).unwrap();
    }
}

// End of file
