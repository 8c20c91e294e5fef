//! The serial veneer maps every trait call one-to-one onto resident calls.

use std::collections::VecDeque;
use std::fmt::Write as _;
use std::sync::{Mutex, MutexGuard};

use embedded_hal::blocking::serial::Write as _;
use embedded_hal::serial::{Read, Write as SerialWrite};

use tailboot::serial::LoaderPort;
use tailboot::stub::{self, ResidentImage};

#[derive(Default)]
struct Wire {
    sent: Mutex<Vec<u8>>,
    replies: Mutex<VecDeque<u8>>,
}

impl ResidentImage for Wire {
    fn tx_byte(&self, unit: u8) {
        self.sent.lock().unwrap().push(unit);
    }

    fn rx_byte(&self) -> u8 {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("wire has no byte queued")
    }
}

fn installed() -> &'static Wire {
    let wire = Box::leak(Box::new(Wire::default()));
    stub::install(wire);
    wire
}

fn exclusive() -> MutexGuard<'static, ()> {
    static GATE: Mutex<()> = Mutex::new(());
    GATE.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[test]
fn reads_and_writes_pass_through_unchanged() {
    let _gate = exclusive();
    let wire = installed();
    wire.replies.lock().unwrap().extend([b'o', b'k']);

    let mut port = LoaderPort::new();
    port.write(b'!').unwrap();
    assert_eq!(port.read().unwrap(), b'o');
    assert_eq!(port.read().unwrap(), b'k');
    port.flush().unwrap();

    assert_eq!(wire.sent.lock().unwrap().as_slice(), b"!");
}

#[test]
fn blocking_writes_cover_whole_slices() {
    let _gate = exclusive();
    let wire = installed();

    let mut port = LoaderPort::new();
    port.bwrite_all(b"boot").unwrap();
    port.bflush().unwrap();

    assert_eq!(wire.sent.lock().unwrap().as_slice(), b"boot");
}

#[test]
fn text_goes_out_byte_for_byte() {
    let _gate = exclusive();
    let wire = installed();

    let mut port = LoaderPort::new();
    write!(port, "up {}", 2).unwrap();

    assert_eq!(wire.sent.lock().unwrap().as_slice(), b"up 2");
}
