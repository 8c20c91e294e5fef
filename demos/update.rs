//! Drops into the resident loader when the update strap is held low.
#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_probe as _;

use embedded_hal::digital::v2::InputPin;
use hal::pac;
use rp2040_hal as hal;

use tailboot::rt::entry;

#[link_section = ".boot_loader"]
#[used]
pub static BOOT_LOADER: [u8; 256] = rp2040_boot2::BOOT_LOADER_W25Q080;

#[entry]
fn main() -> ! {
    let mut pac = pac::Peripherals::take().unwrap();
    let sio = hal::Sio::new(pac.SIO);

    let pins = hal::gpio::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );
    let strap = pins.gpio22.into_pull_up_input();

    defmt::info!("update: watching the strap");
    loop {
        if strap.is_low().unwrap() {
            // The loader resets the part if it takes an image, so this
            // usually doesn't come back.
            unsafe { tailboot::enter() };
            defmt::info!("update: loader declined, back to waiting");
        }
        cortex_m::asm::wfe();
    }
}

// End of file
