pub mod consts;
pub mod cpu;
pub mod input;
pub mod programs;
pub mod ram;
pub mod screen;

use std::io::{Error, ErrorKind};

pub use cpu::{AddressingMode, Cpu, CpuError, CpuFlags, OpCode, StepOutcome};
pub use input::Direction;
pub use screen::Screen;

/// Writes a snapshot of `cpu`, registers and memory included, into `data`.
pub fn serialize(cpu: &Cpu, data: &mut [u8]) -> Result<(), Error> {
    match postcard::to_slice(cpu, data) {
        Err(e) => Err(Error::new(ErrorKind::InvalidData, format!("{}", e))),
        Ok(_) => Ok(()),
    }
}

pub fn serialize_size(cpu: &Cpu) -> Result<usize, Error> {
    postcard::experimental::serialized_size(cpu)
        .map_err(|e| Error::new(ErrorKind::InvalidData, format!("{}", e)))
}

pub fn to_vec(cpu: &Cpu) -> Result<Vec<u8>, Error> {
    postcard::to_allocvec(cpu).map_err(|e| Error::new(ErrorKind::InvalidData, format!("{}", e)))
}

pub fn deserialize(data: &[u8]) -> Result<Cpu, Error> {
    match postcard::from_bytes::<Cpu>(data) {
        Err(e) => Err(Error::new(ErrorKind::InvalidData, format!("{}", e))),
        Ok(cpu) => Ok(cpu),
    }
}

pub const fn info() -> (&'static str, &'static str) {
    ("Pocket6502", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_resumes_identically() {
        let mut cpu = Cpu::new();
        // LDX #$00; loop: INX; STX $10; CPX #$20; BNE loop; BRK
        cpu.load(&[0xA2, 0x00, 0xE8, 0x86, 0x10, 0xE0, 0x20, 0xD0, 0xF9, 0x00]);
        cpu.reset();
        for _ in 0..25 {
            cpu.step().unwrap();
        }

        let snapshot = to_vec(&cpu).unwrap();
        let mut restored = deserialize(&snapshot).unwrap();
        assert_eq!(format!("{:?}", restored), format!("{:?}", cpu));

        cpu.run().unwrap();
        restored.run().unwrap();
        assert_eq!(format!("{:?}", restored), format!("{:?}", cpu));
        assert_eq!(restored.mem_read(0x10), 0x20);
        assert_eq!(restored.ram().as_slice(), cpu.ram().as_slice());
    }

    #[test]
    fn serialize_into_slice() {
        let mut cpu = Cpu::new();
        cpu.set_a(0x42);
        cpu.mem_write(0x1234, 0x99);
        let mut data = vec![0u8; serialize_size(&cpu).unwrap()];
        serialize(&cpu, &mut data).unwrap();
        let restored = deserialize(&data).unwrap();
        assert_eq!(restored.a(), 0x42);
        assert_eq!(restored.mem_read(0x1234), 0x99);
    }

    #[test]
    fn serialize_into_short_buffer_fails() {
        let cpu = Cpu::new();
        let mut data = [0u8; 16];
        let err = serialize(&cpu, &mut data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn deserialize_garbage_fails() {
        let err = deserialize(&[0xFF, 0xFF]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }
}
