use log::trace;

use crate::consts::INPUT_ADDR;
use crate::cpu::Cpu;

/// Direction key, stored by the program's convention as the ASCII byte of
/// `w`/`s`/`a`/`d` at 0x00FF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Direction {
    Up = b'w',
    Down = b's',
    Left = b'a',
    Right = b'd',
}

impl Direction {
    #[must_use]
    pub fn from_key(key: char) -> Option<Direction> {
        match key.to_ascii_lowercase() {
            'w' => Some(Direction::Up),
            's' => Some(Direction::Down),
            'a' => Some(Direction::Left),
            'd' => Some(Direction::Right),
            _ => None,
        }
    }

    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn write_to(self, cpu: &mut Cpu) {
        trace!("Input: {:?} (0x{:02x})", self, self.code());
        cpu.mem_write(INPUT_ADDR, self.code());
    }
}
