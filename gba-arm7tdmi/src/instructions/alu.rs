//! Execution for THUMB Formats 1-5: shifts, add/subtract, immediate and
//! register ALU ops, and the non-branching half of hi-register operations.

use crate::instructions::flags::{add_with_flags, shift_with_carry, sub_with_flags, ShiftKind};
use crate::registers::Registers;
use crate::thumb::thumb_alu;

/// Format 1: `LSL/LSR/ASR Rd, Rs, #offset`. THUMB encodes "shift by 32" for
/// LSR/ASR as an immediate of 0; LSL's immediate 0 means a real shift by 0.
pub fn exec_move_shifted_register(regs: &mut Registers, op: u8, offset: u8, rs: u8, rd: u8) {
    let value = regs.r[rs as usize];
    let (kind, amount) = match op {
        0 => (ShiftKind::Lsl, offset as u32),
        1 => (ShiftKind::Lsr, if offset == 0 { 32 } else { offset as u32 }),
        2 => (ShiftKind::Asr, if offset == 0 { 32 } else { offset as u32 }),
        _ => unreachable!("op 3 is routed to AddSubtract by the decoder"),
    };
    let (result, carry) = shift_with_carry(kind, value, amount, regs.flag_c());
    regs.r[rd as usize] = result;
    regs.set_flags_nz(result);
    regs.set_flag_c(carry);
}

/// Format 2: `ADD/SUB Rd, Rs, Rn` or `ADD/SUB Rd, Rs, #offset3`.
pub fn exec_add_subtract(regs: &mut Registers, sub: bool, immediate: bool, rn_offset: u8, rs: u8, rd: u8) {
    let a = regs.r[rs as usize];
    let b = if immediate {
        rn_offset as u32
    } else {
        regs.r[rn_offset as usize]
    };
    let (result, carry, overflow) = if sub {
        sub_with_flags(a, b, 0)
    } else {
        add_with_flags(a, b, false)
    };
    regs.r[rd as usize] = result;
    regs.set_flags(result & 0x8000_0000 != 0, result == 0, carry, overflow);
}

/// Format 3: `MOV/CMP/ADD/SUB Rd, #imm8`.
pub fn exec_alu_immediate(regs: &mut Registers, op: u8, rd: u8, imm8: u8) {
    let rd_val = regs.r[rd as usize];
    let imm = imm8 as u32;
    match op {
        0 => {
            // MOV
            regs.r[rd as usize] = imm;
            regs.set_flags_nz(imm);
        }
        1 => {
            // CMP
            let (result, carry, overflow) = sub_with_flags(rd_val, imm, 0);
            regs.set_flags(result & 0x8000_0000 != 0, result == 0, carry, overflow);
        }
        2 => {
            // ADD
            let (result, carry, overflow) = add_with_flags(rd_val, imm, false);
            regs.r[rd as usize] = result;
            regs.set_flags(result & 0x8000_0000 != 0, result == 0, carry, overflow);
        }
        3 => {
            // SUB
            let (result, carry, overflow) = sub_with_flags(rd_val, imm, 0);
            regs.r[rd as usize] = result;
            regs.set_flags(result & 0x8000_0000 != 0, result == 0, carry, overflow);
        }
        _ => unreachable!("op is a 2-bit field"),
    }
}

/// Format 4: the sixteen two-operand ALU operations, `Rd op= Rs`.
pub fn exec_alu_operation(regs: &mut Registers, op: u8, rs: u8, rd: u8) {
    let rd_val = regs.r[rd as usize];
    let rs_val = regs.r[rs as usize];

    macro_rules! write_nz {
        ($result:expr) => {{
            regs.r[rd as usize] = $result;
            regs.set_flags_nz($result);
        }};
    }

    match op {
        thumb_alu::AND => write_nz!(rd_val & rs_val),
        thumb_alu::EOR => write_nz!(rd_val ^ rs_val),
        thumb_alu::LSL => {
            let (result, carry) = shift_with_carry(ShiftKind::Lsl, rd_val, rs_val & 0xFF, regs.flag_c());
            regs.r[rd as usize] = result;
            regs.set_flags_nz(result);
            regs.set_flag_c(carry);
        }
        thumb_alu::LSR => {
            let (result, carry) = shift_with_carry(ShiftKind::Lsr, rd_val, rs_val & 0xFF, regs.flag_c());
            regs.r[rd as usize] = result;
            regs.set_flags_nz(result);
            regs.set_flag_c(carry);
        }
        thumb_alu::ASR => {
            let (result, carry) = shift_with_carry(ShiftKind::Asr, rd_val, rs_val & 0xFF, regs.flag_c());
            regs.r[rd as usize] = result;
            regs.set_flags_nz(result);
            regs.set_flag_c(carry);
        }
        thumb_alu::ROR => {
            let (result, carry) = shift_with_carry(ShiftKind::Ror, rd_val, rs_val & 0xFF, regs.flag_c());
            regs.r[rd as usize] = result;
            regs.set_flags_nz(result);
            regs.set_flag_c(carry);
        }
        thumb_alu::ADC => {
            let (result, carry, overflow) = add_with_flags(rd_val, rs_val, regs.flag_c());
            regs.r[rd as usize] = result;
            regs.set_flags(result & 0x8000_0000 != 0, result == 0, carry, overflow);
        }
        thumb_alu::SBC => {
            let borrow_in = if regs.flag_c() { 0 } else { 1 };
            let (result, carry, overflow) = sub_with_flags(rd_val, rs_val, borrow_in);
            regs.r[rd as usize] = result;
            regs.set_flags(result & 0x8000_0000 != 0, result == 0, carry, overflow);
        }
        thumb_alu::TST => regs.set_flags_nz(rd_val & rs_val),
        thumb_alu::NEG => {
            let (result, carry, overflow) = sub_with_flags(0, rs_val, 0);
            regs.r[rd as usize] = result;
            regs.set_flags(result & 0x8000_0000 != 0, result == 0, carry, overflow);
        }
        thumb_alu::CMP => {
            let (result, carry, overflow) = sub_with_flags(rd_val, rs_val, 0);
            regs.set_flags(result & 0x8000_0000 != 0, result == 0, carry, overflow);
        }
        thumb_alu::CMN => {
            let (result, carry, overflow) = add_with_flags(rd_val, rs_val, false);
            regs.set_flags(result & 0x8000_0000 != 0, result == 0, carry, overflow);
        }
        thumb_alu::ORR => write_nz!(rd_val | rs_val),
        thumb_alu::MUL => write_nz!(rd_val.wrapping_mul(rs_val)),
        thumb_alu::BIC => write_nz!(rd_val & !rs_val),
        thumb_alu::MVN => write_nz!(!rs_val),
        _ => unreachable!("op is a 4-bit field"),
    }
}

/// Format 5 ops 0-2: `ADD/CMP/MOV` with either operand possibly in R8-R15.
/// Op 3 (BX) branches and is handled in `instructions::branch`.
pub fn exec_hi_register_alu(regs: &mut Registers, op: u8, h1: bool, h2: bool, rs: u8, rd: u8) {
    let rd_idx = ((h1 as u8) << 3 | rd) as usize;
    let rs_idx = ((h2 as u8) << 3 | rs) as usize;
    let rd_val = regs.r[rd_idx];
    let rs_val = regs.r[rs_idx];

    match op {
        0 => regs.r[rd_idx] = rd_val.wrapping_add(rs_val),
        1 => {
            let (result, carry, overflow) = sub_with_flags(rd_val, rs_val, 0);
            regs.set_flags(result & 0x8000_0000 != 0, result == 0, carry, overflow);
        }
        2 => regs.r[rd_idx] = rs_val,
        _ => unreachable!("op 3 (BX) is dispatched to exec_branch_exchange"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_shifted_register_lsr_immediate_zero_means_32() {
        let mut regs = Registers::new();
        regs.r[1] = 0x8000_0000;
        exec_move_shifted_register(&mut regs, 1, 0, 1, 0);
        assert_eq!(regs.r[0], 0);
        assert!(regs.flag_c());
        assert!(regs.flag_z());
    }

    #[test]
    fn add_subtract_immediate_form() {
        let mut regs = Registers::new();
        regs.r[1] = 5;
        exec_add_subtract(&mut regs, true, true, 3, 1, 0);
        assert_eq!(regs.r[0], 2);
        assert!(regs.flag_c());
    }

    #[test]
    fn alu_operation_tst_preserves_carry_and_overflow() {
        let mut regs = Registers::new();
        regs.set_flags(false, false, true, true);
        regs.r[0] = 0xF0;
        regs.r[1] = 0x0F;
        exec_alu_operation(&mut regs, thumb_alu::TST, 1, 0);
        assert!(regs.flag_z());
        assert!(regs.flag_c());
        assert!(regs.flag_v());
        assert_eq!(regs.r[0], 0xF0); // TST never writes Rd
    }

    #[test]
    fn hi_register_add_does_not_touch_flags() {
        let mut regs = Registers::new();
        regs.set_flags(true, true, true, true);
        regs.r[9] = 10;
        regs.r[1] = 5;
        exec_hi_register_alu(&mut regs, 0, true, false, 1, 1);
        assert_eq!(regs.r[9], 15);
        assert!(regs.flag_n() && regs.flag_z() && regs.flag_c() && regs.flag_v());
    }
}
