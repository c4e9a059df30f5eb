pub mod addressing;
pub mod instructions;
pub mod opcodes;

use core::fmt;

use bitflags::bitflags;
use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};

use crate::consts::{PROGRAM_ADDR, RESV_ADDR, STACK, STACK_RESET};
use crate::ram::Ram;
pub use addressing::AddressingMode;
pub use opcodes::{OpCode, CPU_OPS_CODES, OPCODES_MAP};

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CpuFlags:u8 {
        const NEGATIVE          = 0b1000_0000; // 80
        const OVERFLOW          = 0b0100_0000; // 40
        const BREAK_2           = 0b0010_0000; // 20
        const BREAK             = 0b0001_0000; // 10
        const DECIMAL_MODE      = 0b0000_1000; // 08
        const INTERRUPT_DISABLE = 0b0000_0100; // 04
        const ZERO              = 0b0000_0010; // 02
        const CARRY             = 0b0000_0001; // 01
    }
}

impl Default for CpuFlags {
    fn default() -> CpuFlags {
        CpuFlags::INTERRUPT_DISABLE | CpuFlags::BREAK_2
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
    UnsupportedAddressingMode(AddressingMode),
    UnrecognizedOpcode { opcode: u8, pc: u16 },
}

impl fmt::Display for CpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CpuError::UnsupportedAddressingMode(mode) => {
                write!(f, "unsupported addressing mode {:?}", mode)
            }
            CpuError::UnrecognizedOpcode { opcode, pc } => {
                write!(f, "unrecognized opcode 0x{:02x} at 0x{:04x}", opcode, pc)
            }
        }
    }
}

impl std::error::Error for CpuError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Halt,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct Cpu {
    a: u8,
    x: u8,
    y: u8,
    s: u8,
    pc: u16,
    flags: CpuFlags,
    ram: Ram,
    halted: bool,
}

impl Cpu {
    #[must_use]
    pub fn new() -> Cpu {
        Cpu {
            a: 0,
            x: 0,
            y: 0,
            s: STACK_RESET,
            pc: 0,
            flags: CpuFlags::default(),
            ram: Ram::new(),
            halted: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn mem_read(&self, addr: u16) -> u8 {
        self.ram.get(addr)
    }

    #[inline]
    pub fn mem_write(&mut self, addr: u16, data: u8) {
        self.ram.set(addr, data);
    }

    #[inline]
    #[must_use]
    pub fn mem_read_u16(&self, addr: u16) -> u16 {
        self.ram.get_u16(addr)
    }

    #[inline]
    pub fn mem_write_u16(&mut self, addr: u16, data: u16) {
        self.ram.set_u16(addr, data);
    }

    /// Copies `program` to 0x8000 and points the reset vector at it.
    pub fn load(&mut self, program: &[u8]) {
        self.load_at(program, PROGRAM_ADDR);
    }

    pub fn load_at(&mut self, program: &[u8], origin: u16) {
        debug!(
            "Load {} bytes at 0x{:04x}, md5:{:x}",
            program.len(),
            origin,
            md5::compute(program)
        );
        self.ram.copy(origin, program);
        self.mem_write_u16(RESV_ADDR, origin);
    }

    /// Registers and flags go back to their power-on values, memory is kept.
    pub fn reset(&mut self) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.s = STACK_RESET;
        self.flags = CpuFlags::default();
        self.pc = self.mem_read_u16(RESV_ADDR);
        self.halted = false;
        debug!("Reset, entry point 0x{:04x}", self.pc);
    }

    /// Executes one instruction.
    ///
    /// Operand bytes are skipped afterwards unless the instruction moved the
    /// program counter itself.
    ///
    /// # Errors
    ///
    /// Fails on a byte with no opcode entry, or on an instruction asking for an
    /// operand it has no addressing mode for.
    pub fn step(&mut self) -> Result<StepOutcome, CpuError> {
        let fetch_pc = self.pc;
        let code = self.mem_read(fetch_pc);
        self.pc = self.pc.wrapping_add(1);

        let opcode = match OPCODES_MAP.get(&code) {
            Some(op) => *op,
            None => {
                warn!("Unrecognized opcode 0x{:02x} at 0x{:04x}", code, fetch_pc);
                return Err(CpuError::UnrecognizedOpcode { opcode: code, pc: fetch_pc });
            }
        };
        trace!("[{:04x}] {:02x} {} {:?}", fetch_pc, code, opcode.mnemonic, self);

        let pc_state = self.pc;
        self.halted = false;
        if let Err(e) = (opcode.execute)(self, opcode.mode) {
            warn!("{} at 0x{:04x} failed: {}", opcode.mnemonic, fetch_pc, e);
            return Err(e);
        }

        if self.halted {
            return Ok(StepOutcome::Halt);
        }

        if pc_state == self.pc {
            self.pc = self.pc.wrapping_add(u16::from(opcode.len) - 1);
        }
        Ok(StepOutcome::Continue)
    }

    /// # Errors
    ///
    /// See [`Cpu::step`].
    pub fn run(&mut self) -> Result<(), CpuError> {
        self.run_with_callback(|_| {})
    }

    /// Steps until BRK, calling `callback` before every instruction.
    ///
    /// # Errors
    ///
    /// See [`Cpu::step`].
    pub fn run_with_callback<F>(&mut self, mut callback: F) -> Result<(), CpuError>
    where
        F: FnMut(&mut Cpu),
    {
        loop {
            callback(self);
            if self.step()? == StepOutcome::Halt {
                info!("BRK at 0x{:04x}, halting", self.pc.wrapping_sub(1));
                return Ok(());
            }
        }
    }

    /// # Errors
    ///
    /// See [`Cpu::step`].
    pub fn load_and_run(&mut self, program: &[u8]) -> Result<(), CpuError> {
        self.load(program);
        self.reset();
        self.run()
    }

    pub(crate) fn halt(&mut self) {
        self.halted = true;
    }

    pub fn set_register_a(&mut self, value: u8) {
        self.a = value;
        self.update_zero_and_negative_flags(value);
    }

    pub fn update_zero_and_negative_flags(&mut self, value: u8) {
        self.flags.set(CpuFlags::ZERO, value == 0);
        self.flags.set(CpuFlags::NEGATIVE, value & 0x80 != 0);
    }

    #[inline]
    pub fn insert_flag(&mut self, flag: CpuFlags) {
        self.flags.insert(flag);
    }

    #[inline]
    pub fn remove_flag(&mut self, flag: CpuFlags) {
        self.flags.remove(flag);
    }

    #[inline]
    #[must_use]
    pub fn has_flag(&self, flag: CpuFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn stack_push(&mut self, data: u8) {
        let addr = STACK + u16::from(self.s);
        trace!("Push 0x{:02x} -> 0x{:04x}", data, addr);
        self.mem_write(addr, data);
        self.s = self.s.wrapping_sub(1);
    }

    pub fn stack_pop(&mut self) -> u8 {
        self.s = self.s.wrapping_add(1);
        let addr = STACK + u16::from(self.s);
        let data = self.mem_read(addr);
        trace!("Pop 0x{:02x} <- 0x{:04x}", data, addr);
        data
    }

    pub fn stack_push_u16(&mut self, data: u16) {
        self.stack_push((data >> 8) as u8);
        self.stack_push(data as u8);
    }

    pub fn stack_pop_u16(&mut self) -> u16 {
        let lo = u16::from(self.stack_pop());
        let hi = u16::from(self.stack_pop());
        (hi << 8) | lo
    }

    pub fn set_a(&mut self, a: u8) {
        self.a = a;
    }

    pub fn set_x(&mut self, x: u8) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: u8) {
        self.y = y;
    }

    pub fn set_s(&mut self, s: u8) {
        self.s = s;
    }

    pub fn set_pc(&mut self, pc: u16) {
        self.pc = pc;
    }

    pub fn set_flags(&mut self, flags: CpuFlags) {
        self.flags = flags;
    }

    #[must_use]
    pub fn a(&self) -> u8 {
        self.a
    }

    #[must_use]
    pub fn x(&self) -> u8 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> u8 {
        self.y
    }

    #[must_use]
    pub fn s(&self) -> u8 {
        self.s
    }

    #[must_use]
    pub fn pc(&self) -> u16 {
        self.pc
    }

    #[must_use]
    pub fn flags(&self) -> CpuFlags {
        self.flags
    }

    #[must_use]
    pub fn ram(&self) -> &Ram {
        &self.ram
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ A:{:02x} X:{:02x} Y:{:02x} S:{:02x} PC:{:04x} P:{:08b} }}",
            self.a,
            self.x,
            self.y,
            self.s,
            self.pc,
            self.flags.bits()
        )
    }
}
