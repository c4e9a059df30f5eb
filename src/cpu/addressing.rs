use serde::{Deserialize, Serialize};

use super::{Cpu, CpuError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressingMode {
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    IndirectX,
    IndirectY,
    NoneAddressing,
}

impl Cpu {
    /// Effective address of the operand for `mode`.
    ///
    /// The program counter must point at the first operand byte; it is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// `NoneAddressing` has no operand to resolve.
    pub fn operand_address(&self, mode: AddressingMode) -> Result<u16, CpuError> {
        let addr = match mode {
            AddressingMode::Immediate => self.pc,
            AddressingMode::ZeroPage => u16::from(self.mem_read(self.pc)),
            AddressingMode::Absolute => self.mem_read_u16(self.pc),
            AddressingMode::ZeroPageX => u16::from(self.mem_read(self.pc).wrapping_add(self.x)),
            AddressingMode::ZeroPageY => u16::from(self.mem_read(self.pc).wrapping_add(self.y)),
            AddressingMode::AbsoluteX => self.mem_read_u16(self.pc).wrapping_add(u16::from(self.x)),
            AddressingMode::AbsoluteY => self.mem_read_u16(self.pc).wrapping_add(u16::from(self.y)),
            AddressingMode::IndirectX => {
                let base = self.mem_read_u16(self.pc) as u8;
                self.zero_page_u16(base.wrapping_add(self.x))
            }
            AddressingMode::IndirectY => {
                let base = self.mem_read(self.pc);
                self.zero_page_u16(base).wrapping_add(u16::from(self.y))
            }
            AddressingMode::NoneAddressing => {
                return Err(CpuError::UnsupportedAddressingMode(mode));
            }
        };
        Ok(addr)
    }

    // Pointer stays within page zero.
    fn zero_page_u16(&self, ptr: u8) -> u16 {
        let lo = u16::from(self.mem_read(u16::from(ptr)));
        let hi = u16::from(self.mem_read(u16::from(ptr.wrapping_add(1))));
        (hi << 8) | lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cpu_at(operand: &[u8]) -> Cpu {
        let mut cpu = Cpu::new();
        cpu.set_pc(0x0200);
        for (i, b) in operand.iter().enumerate() {
            cpu.mem_write(0x0200 + i as u16, *b);
        }
        cpu
    }

    #[test]
    fn immediate() {
        let cpu = cpu_at(&[0x42]);
        assert_eq!(cpu.operand_address(AddressingMode::Immediate), Ok(0x0200));
    }

    #[test]
    fn zero_page() {
        let mut cpu = cpu_at(&[0x80]);
        assert_eq!(cpu.operand_address(AddressingMode::ZeroPage), Ok(0x0080));
        cpu.set_x(0x90);
        cpu.set_y(0x05);
        assert_eq!(cpu.operand_address(AddressingMode::ZeroPageX), Ok(0x0010));
        assert_eq!(cpu.operand_address(AddressingMode::ZeroPageY), Ok(0x0085));
    }

    #[test]
    fn absolute() {
        let mut cpu = cpu_at(&[0x34, 0x12]);
        assert_eq!(cpu.operand_address(AddressingMode::Absolute), Ok(0x1234));
        cpu.set_x(0x10);
        cpu.set_y(0xFF);
        assert_eq!(cpu.operand_address(AddressingMode::AbsoluteX), Ok(0x1244));
        assert_eq!(cpu.operand_address(AddressingMode::AbsoluteY), Ok(0x1333));
    }

    #[test]
    fn absolute_indexed_wraps() {
        let mut cpu = cpu_at(&[0xFF, 0xFF]);
        cpu.set_x(0x02);
        assert_eq!(cpu.operand_address(AddressingMode::AbsoluteX), Ok(0x0001));
    }

    #[test]
    fn indirect_x() {
        let mut cpu = cpu_at(&[0x20]);
        cpu.set_x(0x04);
        cpu.mem_write_u16(0x24, 0x2074);
        assert_eq!(cpu.operand_address(AddressingMode::IndirectX), Ok(0x2074));
    }

    #[test]
    fn indirect_x_pointer_wraps_in_zero_page() {
        let mut cpu = cpu_at(&[0xFE]);
        cpu.set_x(0x01);
        cpu.mem_write(0x00FF, 0x34);
        cpu.mem_write(0x0000, 0x12);
        cpu.mem_write(0x0100, 0x99);
        assert_eq!(cpu.operand_address(AddressingMode::IndirectX), Ok(0x1234));
    }

    #[test]
    fn indirect_y() {
        let mut cpu = cpu_at(&[0x86]);
        cpu.set_y(0x10);
        cpu.mem_write_u16(0x86, 0x4028);
        assert_eq!(cpu.operand_address(AddressingMode::IndirectY), Ok(0x4038));
    }

    #[test]
    fn indirect_y_wraps() {
        let mut cpu = cpu_at(&[0xFF]);
        cpu.set_y(0x02);
        cpu.mem_write(0x00FF, 0xFF);
        cpu.mem_write(0x0000, 0xFF);
        assert_eq!(cpu.operand_address(AddressingMode::IndirectY), Ok(0x0001));
    }

    #[test]
    fn none_addressing_is_an_error() {
        let cpu = cpu_at(&[]);
        assert_eq!(
            cpu.operand_address(AddressingMode::NoneAddressing),
            Err(CpuError::UnsupportedAddressingMode(AddressingMode::NoneAddressing))
        );
    }

    #[test]
    fn resolver_leaves_pc_alone() {
        let mut cpu = cpu_at(&[0x34, 0x12]);
        cpu.set_x(1);
        let _ = cpu.operand_address(AddressingMode::AbsoluteX);
        assert_eq!(cpu.pc(), 0x0200);
    }
}
