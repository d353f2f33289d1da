//! Serial Port (COM1) log sink
//!
//! Backs the `log` facade with a polled 16550 UART on COM1 (0x3F8), so
//! dispatcher and context diagnostics reach the host console.

use core::fmt::{self, Write};

use log::{LevelFilter, Log, Metadata, Record};
use spin::Mutex;
use x86_64::instructions::port::Port;

const SERIAL_PORT: u16 = 0x3F8; // COM1

pub struct SerialPort {
    data: Port<u8>,
    line_status: Port<u8>,
}

impl SerialPort {
    const fn new() -> Self {
        SerialPort {
            data: Port::new(SERIAL_PORT),
            line_status: Port::new(SERIAL_PORT + 5),
        }
    }

    /// Initialize the serial port
    pub fn init(&mut self) {
        unsafe {
            // Disable interrupts
            Port::new(SERIAL_PORT + 1).write(0x00u8);

            // Enable DLAB (set baud rate divisor)
            Port::new(SERIAL_PORT + 3).write(0x80u8);

            // Set divisor to 3 (38400 baud)
            Port::new(SERIAL_PORT).write(0x03u8);
            Port::new(SERIAL_PORT + 1).write(0x00u8);

            // 8 bits, no parity, one stop bit
            Port::new(SERIAL_PORT + 3).write(0x03u8);

            // Enable FIFO, clear with 14-byte threshold
            Port::new(SERIAL_PORT + 2).write(0xC7u8);

            // Mark data terminal ready, request to send
            Port::new(SERIAL_PORT + 4).write(0x0Bu8);
        }
    }

    fn is_transmit_empty(&mut self) -> bool {
        unsafe { (self.line_status.read() & 0x20) != 0 }
    }

    pub fn send_byte(&mut self, byte: u8) {
        // Bounded wait, a wedged UART must not hang a trap
        for _ in 0..10000 {
            if self.is_transmit_empty() {
                break;
            }
        }

        unsafe {
            self.data.write(byte);
        }
    }
}

impl Write for SerialPort {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            if byte == b'\n' {
                self.send_byte(b'\r');
            }
            self.send_byte(byte);
        }
        Ok(())
    }
}

static SERIAL: Mutex<SerialPort> = Mutex::new(SerialPort::new());

/// `log` backend writing `[LEVEL] target: message` lines to COM1.
pub struct SerialLogger;

static LOGGER: SerialLogger = SerialLogger;

impl Log for SerialLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut port = SERIAL.lock();
        let _ = writeln!(port, "[{}] {}: {}", record.level(), record.target(), record.args());
    }

    fn flush(&self) {}
}

/// Programs COM1 and installs [`SerialLogger`] as the global logger.
pub fn init_logger(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    SERIAL.lock().init();
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}
