use log::trace;
use serde::{Deserialize, Serialize};

use crate::consts::RAM_MAX;

#[derive(Clone, Serialize, Deserialize)]
pub struct Ram {
    data: Vec<u8>,
}

impl Ram {
    #[must_use]
    pub fn new() -> Ram {
        Ram {
            data: vec![0; (RAM_MAX as usize) + 1],
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    #[inline]
    pub fn set(&mut self, addr: u16, data: u8) {
        self.data[addr as usize] = data;
    }

    /// Little-endian, the high byte address wraps around the 64K space.
    #[inline]
    #[must_use]
    pub fn get_u16(&self, addr: u16) -> u16 {
        u16::from(self.get(addr)) | (u16::from(self.get(addr.wrapping_add(1))) << 8)
    }

    #[inline]
    pub fn set_u16(&mut self, addr: u16, data: u16) {
        self.set(addr, data as u8);
        self.set(addr.wrapping_add(1), (data >> 8) as u8);
    }

    pub fn fill(&mut self, v: u8) {
        self.data.fill(v);
    }

    /// Wraps around to 0x0000 past the top of memory.
    pub fn copy(&mut self, dest: u16, buf: &[u8]) {
        let d = dest as usize;
        let head = buf.len().min(RAM_MAX as usize + 1 - d);
        self.data[d..d + head].copy_from_slice(&buf[..head]);
        for (i, b) in buf.iter().enumerate().skip(head) {
            self.set(dest.wrapping_add(i as u16), *b);
        }
        trace!("Copy {} bytes to 0x{:04x}", buf.len(), dest);
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

impl Default for Ram {
    fn default() -> Self {
        Ram::new()
    }
}
