//! Shared arithmetic/shift primitives every THUMB execution routine builds
//! on, instead of recomputing carry/overflow/shift-out rules inline the way
//! the teacher's ARM `instructions/alu.rs` does per-opcode.

/// The four barrel-shifter operations THUMB's Format 1 and Format 4 share.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftKind {
    Lsl,
    Lsr,
    Asr,
    Ror,
}

/// `a + b + c_in` with carry-out and signed-overflow, computed as a 33-bit
/// unsigned sum so shift-by-32-style edge cases never need special-casing.
pub fn add_with_flags(a: u32, b: u32, c_in: bool) -> (u32, bool, bool) {
    let sum = a as u64 + b as u64 + c_in as u64;
    let result = sum as u32;
    let carry = sum > 0xFFFF_FFFF;
    let overflow = ((a ^ result) & (b ^ result) & 0x8000_0000) != 0;
    (result, carry, overflow)
}

/// `a - b - borrow_in` (borrow_in is 0 for plain SUB/CMP/NEG, and
/// `if !carry { 1 } else { 0 }` for SBC). Carry-out follows the ARM
/// "NOT borrow" convention: C = 1 means no borrow occurred.
pub fn sub_with_flags(a: u32, b: u32, borrow_in: u32) -> (u32, bool, bool) {
    let result = a.wrapping_sub(b).wrapping_sub(borrow_in);
    let carry = (a as u64) >= (b as u64 + borrow_in as u64);
    let overflow = ((a ^ b) & (a ^ result) & 0x8000_0000) != 0;
    (result, carry, overflow)
}

/// Apply one of the four shift kinds, returning `(result, carry_out)`.
///
/// `amount` is the raw shift count as it would be used at the instruction
/// level: callers that decode THUMB's immediate-0-means-shift-by-32 LSR/ASR
/// encoding (Format 1) must translate `0 -> 32` themselves before calling
/// this; the register-sourced shift of Format 4 (the full low byte of Rs,
/// 0..255) passes its amount through unchanged.
pub fn shift_with_carry(kind: ShiftKind, value: u32, amount: u32, carry_in: bool) -> (u32, bool) {
    if amount == 0 {
        return (value, carry_in);
    }

    match kind {
        ShiftKind::Lsl => {
            if amount < 32 {
                (value << amount, (value >> (32 - amount)) & 1 != 0)
            } else if amount == 32 {
                (0, value & 1 != 0)
            } else {
                (0, false)
            }
        }
        ShiftKind::Lsr => {
            if amount < 32 {
                (value >> amount, (value >> (amount - 1)) & 1 != 0)
            } else if amount == 32 {
                (0, (value >> 31) & 1 != 0)
            } else {
                (0, false)
            }
        }
        ShiftKind::Asr => {
            if amount < 32 {
                (((value as i32) >> amount) as u32, (value >> (amount - 1)) & 1 != 0)
            } else {
                let bit31 = value & 0x8000_0000 != 0;
                (if bit31 { 0xFFFF_FFFF } else { 0 }, bit31)
            }
        }
        ShiftKind::Ror => {
            let amt = amount % 32;
            if amt == 0 {
                (value, (value >> 31) & 1 != 0)
            } else {
                (value.rotate_right(amt), (value >> (amt - 1)) & 1 != 0)
            }
        }
    }
}
