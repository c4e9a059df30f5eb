//! Instruction semantics.
//!
//! Every function runs with the program counter already past the opcode byte.
//! Control flow instructions move it themselves; everything else leaves it
//! alone and lets the stepper skip the operand bytes.

use super::{AddressingMode, Cpu, CpuError, CpuFlags};

type Outcome = Result<(), CpuError>;

fn operand(cpu: &Cpu, mode: AddressingMode) -> Result<u8, CpuError> {
    let addr = cpu.operand_address(mode)?;
    Ok(cpu.mem_read(addr))
}

// Load/Store

pub fn lda(cpu: &mut Cpu, mode: AddressingMode) -> Outcome {
    let value = operand(cpu, mode)?;
    cpu.set_register_a(value);
    Ok(())
}

pub fn ldx(cpu: &mut Cpu, mode: AddressingMode) -> Outcome {
    cpu.x = operand(cpu, mode)?;
    cpu.update_zero_and_negative_flags(cpu.x);
    Ok(())
}

pub fn ldy(cpu: &mut Cpu, mode: AddressingMode) -> Outcome {
    cpu.y = operand(cpu, mode)?;
    cpu.update_zero_and_negative_flags(cpu.y);
    Ok(())
}

pub fn sta(cpu: &mut Cpu, mode: AddressingMode) -> Outcome {
    let addr = cpu.operand_address(mode)?;
    cpu.mem_write(addr, cpu.a);
    Ok(())
}

pub fn stx(cpu: &mut Cpu, mode: AddressingMode) -> Outcome {
    let addr = cpu.operand_address(mode)?;
    cpu.mem_write(addr, cpu.x);
    Ok(())
}

pub fn sty(cpu: &mut Cpu, mode: AddressingMode) -> Outcome {
    let addr = cpu.operand_address(mode)?;
    cpu.mem_write(addr, cpu.y);
    Ok(())
}

// Transfers

pub fn tax(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    cpu.x = cpu.a;
    cpu.update_zero_and_negative_flags(cpu.x);
    Ok(())
}

pub fn tay(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    cpu.y = cpu.a;
    cpu.update_zero_and_negative_flags(cpu.y);
    Ok(())
}

pub fn tsx(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    cpu.x = cpu.s;
    cpu.update_zero_and_negative_flags(cpu.x);
    Ok(())
}

pub fn txa(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    cpu.set_register_a(cpu.x);
    Ok(())
}

pub fn txs(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    cpu.s = cpu.x;
    Ok(())
}

pub fn tya(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    cpu.set_register_a(cpu.y);
    Ok(())
}

// Logic

pub fn and(cpu: &mut Cpu, mode: AddressingMode) -> Outcome {
    let value = operand(cpu, mode)?;
    cpu.set_register_a(cpu.a & value);
    Ok(())
}

pub fn eor(cpu: &mut Cpu, mode: AddressingMode) -> Outcome {
    let value = operand(cpu, mode)?;
    cpu.set_register_a(cpu.a ^ value);
    Ok(())
}

pub fn ora(cpu: &mut Cpu, mode: AddressingMode) -> Outcome {
    let value = operand(cpu, mode)?;
    cpu.set_register_a(cpu.a | value);
    Ok(())
}

pub fn bit(cpu: &mut Cpu, mode: AddressingMode) -> Outcome {
    let value = operand(cpu, mode)?;
    cpu.flags.set(CpuFlags::ZERO, cpu.a & value == 0);
    cpu.flags.set(CpuFlags::NEGATIVE, value & 0b1000_0000 != 0);
    cpu.flags.set(CpuFlags::OVERFLOW, value & 0b0100_0000 != 0);
    Ok(())
}

// Arithmetic

fn add_to_register_a(cpu: &mut Cpu, value: u8) {
    let sum = u16::from(cpu.a) + u16::from(value) + u16::from(cpu.has_flag(CpuFlags::CARRY));
    let result = sum as u8;
    cpu.flags.set(CpuFlags::CARRY, sum > 0xFF);
    cpu.flags.set(
        CpuFlags::OVERFLOW,
        (value ^ result) & (result ^ cpu.a) & 0x80 != 0,
    );
    cpu.set_register_a(result);
}

pub fn adc(cpu: &mut Cpu, mode: AddressingMode) -> Outcome {
    let value = operand(cpu, mode)?;
    add_to_register_a(cpu, value);
    Ok(())
}

/// Goes through the ADC path with `memory - 1` (signed, wrapping) as operand,
/// which is not the hardware `!memory`.
pub fn sbc(cpu: &mut Cpu, mode: AddressingMode) -> Outcome {
    let value = operand(cpu, mode)?;
    add_to_register_a(cpu, (value as i8).wrapping_sub(1) as u8);
    Ok(())
}

// Shifts and rotates

fn shift_memory(cpu: &mut Cpu, mode: AddressingMode, op: fn(&mut Cpu, u8) -> u8) -> Outcome {
    let addr = cpu.operand_address(mode)?;
    let value = cpu.mem_read(addr);
    let result = op(cpu, value);
    cpu.mem_write(addr, result);
    cpu.update_zero_and_negative_flags(result);
    Ok(())
}

fn shift_accumulator(cpu: &mut Cpu, op: fn(&mut Cpu, u8) -> u8) -> Outcome {
    let value = cpu.a;
    let result = op(cpu, value);
    cpu.set_register_a(result);
    Ok(())
}

fn asl_value(cpu: &mut Cpu, v: u8) -> u8 {
    cpu.flags.set(CpuFlags::CARRY, v & 0x80 != 0);
    v << 1
}

fn lsr_value(cpu: &mut Cpu, v: u8) -> u8 {
    cpu.flags.set(CpuFlags::CARRY, v & 0x01 != 0);
    v >> 1
}

fn rol_value(cpu: &mut Cpu, v: u8) -> u8 {
    let carry_in = u8::from(cpu.has_flag(CpuFlags::CARRY));
    cpu.flags.set(CpuFlags::CARRY, v & 0x80 != 0);
    (v << 1) | carry_in
}

fn ror_value(cpu: &mut Cpu, v: u8) -> u8 {
    let carry_in = u8::from(cpu.has_flag(CpuFlags::CARRY)) << 7;
    cpu.flags.set(CpuFlags::CARRY, v & 0x01 != 0);
    (v >> 1) | carry_in
}

pub fn asl(cpu: &mut Cpu, mode: AddressingMode) -> Outcome {
    shift_memory(cpu, mode, asl_value)
}

pub fn asl_accumulator(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    shift_accumulator(cpu, asl_value)
}

pub fn lsr(cpu: &mut Cpu, mode: AddressingMode) -> Outcome {
    shift_memory(cpu, mode, lsr_value)
}

pub fn lsr_accumulator(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    shift_accumulator(cpu, lsr_value)
}

pub fn rol(cpu: &mut Cpu, mode: AddressingMode) -> Outcome {
    shift_memory(cpu, mode, rol_value)
}

pub fn rol_accumulator(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    shift_accumulator(cpu, rol_value)
}

pub fn ror(cpu: &mut Cpu, mode: AddressingMode) -> Outcome {
    shift_memory(cpu, mode, ror_value)
}

pub fn ror_accumulator(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    shift_accumulator(cpu, ror_value)
}

// Increments and decrements

pub fn inc(cpu: &mut Cpu, mode: AddressingMode) -> Outcome {
    let addr = cpu.operand_address(mode)?;
    let result = cpu.mem_read(addr).wrapping_add(1);
    cpu.mem_write(addr, result);
    cpu.update_zero_and_negative_flags(result);
    Ok(())
}

pub fn dec(cpu: &mut Cpu, mode: AddressingMode) -> Outcome {
    let addr = cpu.operand_address(mode)?;
    let result = cpu.mem_read(addr).wrapping_sub(1);
    cpu.mem_write(addr, result);
    cpu.update_zero_and_negative_flags(result);
    Ok(())
}

pub fn inx(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.update_zero_and_negative_flags(cpu.x);
    Ok(())
}

pub fn iny(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.update_zero_and_negative_flags(cpu.y);
    Ok(())
}

pub fn dex(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.update_zero_and_negative_flags(cpu.x);
    Ok(())
}

pub fn dey(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.update_zero_and_negative_flags(cpu.y);
    Ok(())
}

// Compare

fn compare(cpu: &mut Cpu, mode: AddressingMode, with: u8) -> Outcome {
    let value = operand(cpu, mode)?;
    cpu.flags.set(CpuFlags::CARRY, value <= with);
    cpu.update_zero_and_negative_flags(with.wrapping_sub(value));
    Ok(())
}

pub fn cmp(cpu: &mut Cpu, mode: AddressingMode) -> Outcome {
    let with = cpu.a;
    compare(cpu, mode, with)
}

pub fn cpx(cpu: &mut Cpu, mode: AddressingMode) -> Outcome {
    let with = cpu.x;
    compare(cpu, mode, with)
}

pub fn cpy(cpu: &mut Cpu, mode: AddressingMode) -> Outcome {
    let with = cpu.y;
    compare(cpu, mode, with)
}

// Branches

fn branch(cpu: &mut Cpu, condition: bool) -> Outcome {
    if condition {
        let offset = cpu.mem_read(cpu.pc) as i8;
        cpu.pc = cpu.pc.wrapping_add(1).wrapping_add(offset as u16);
    }
    Ok(())
}

pub fn beq(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    let condition = cpu.has_flag(CpuFlags::ZERO);
    branch(cpu, condition)
}

pub fn bne(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    let condition = !cpu.has_flag(CpuFlags::ZERO);
    branch(cpu, condition)
}

pub fn bvs(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    let condition = cpu.has_flag(CpuFlags::OVERFLOW);
    branch(cpu, condition)
}

pub fn bvc(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    let condition = !cpu.has_flag(CpuFlags::OVERFLOW);
    branch(cpu, condition)
}

pub fn bmi(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    let condition = cpu.has_flag(CpuFlags::NEGATIVE);
    branch(cpu, condition)
}

pub fn bpl(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    let condition = !cpu.has_flag(CpuFlags::NEGATIVE);
    branch(cpu, condition)
}

pub fn bcs(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    let condition = cpu.has_flag(CpuFlags::CARRY);
    branch(cpu, condition)
}

pub fn bcc(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    let condition = !cpu.has_flag(CpuFlags::CARRY);
    branch(cpu, condition)
}

// Jumps and subroutines

pub fn jmp_absolute(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    cpu.pc = cpu.mem_read_u16(cpu.pc);
    Ok(())
}

/// Reproduces the NMOS page wrap: a pointer at $xxFF takes its high byte
/// from $xx00.
pub fn jmp_indirect(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    let ptr = cpu.mem_read_u16(cpu.pc);
    cpu.pc = if ptr & 0x00FF == 0x00FF {
        let lo = u16::from(cpu.mem_read(ptr));
        let hi = u16::from(cpu.mem_read(ptr & 0xFF00));
        (hi << 8) | lo
    } else {
        cpu.mem_read_u16(ptr)
    };
    Ok(())
}

pub fn jsr(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    cpu.stack_push_u16(cpu.pc.wrapping_add(2).wrapping_sub(1));
    cpu.pc = cpu.mem_read_u16(cpu.pc);
    Ok(())
}

pub fn rts(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    cpu.pc = cpu.stack_pop_u16().wrapping_add(1);
    Ok(())
}

pub fn rti(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    pull_status(cpu);
    cpu.pc = cpu.stack_pop_u16();
    Ok(())
}

// Flags

pub fn clc(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    cpu.remove_flag(CpuFlags::CARRY);
    Ok(())
}

pub fn sec(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    cpu.insert_flag(CpuFlags::CARRY);
    Ok(())
}

pub fn cli(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    cpu.remove_flag(CpuFlags::INTERRUPT_DISABLE);
    Ok(())
}

pub fn sei(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    cpu.insert_flag(CpuFlags::INTERRUPT_DISABLE);
    Ok(())
}

pub fn cld(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    cpu.remove_flag(CpuFlags::DECIMAL_MODE);
    Ok(())
}

pub fn sed(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    cpu.insert_flag(CpuFlags::DECIMAL_MODE);
    Ok(())
}

pub fn clv(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    cpu.remove_flag(CpuFlags::OVERFLOW);
    Ok(())
}

// Stack

fn pull_status(cpu: &mut Cpu) {
    cpu.flags = CpuFlags::from_bits_retain(cpu.stack_pop());
    cpu.flags.remove(CpuFlags::BREAK);
    cpu.flags.insert(CpuFlags::BREAK_2);
}

pub fn pha(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    cpu.stack_push(cpu.a);
    Ok(())
}

pub fn pla(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    let value = cpu.stack_pop();
    cpu.set_register_a(value);
    Ok(())
}

pub fn php(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    cpu.stack_push((cpu.flags | CpuFlags::BREAK | CpuFlags::BREAK_2).bits());
    Ok(())
}

pub fn plp(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    pull_status(cpu);
    Ok(())
}

// System

/// Stops the run loop, no interrupt sequence.
pub fn brk(cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    cpu.halt();
    Ok(())
}

pub fn nop(_cpu: &mut Cpu, _mode: AddressingMode) -> Outcome {
    Ok(())
}
