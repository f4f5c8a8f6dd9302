use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::registers::{CpuMode, Registers};

//==============================================================================
// MEMORY BUS
//==============================================================================
// `MemoryBus` is the seam between the CPU and whatever backs guest memory.
// Any component that implements it can drive the interpreter: a real
// `gba-core::Bus`, or a tiny in-test double. Keeping the CPU generic over
// this trait means the interpreter never has to know about I/O registers,
// mirroring, or wait states — only about reading and writing typed values.
//==============================================================================

/// Typed memory access the interpreter needs from its backing store.
pub trait MemoryBus {
    fn read8(&mut self, addr: u32) -> u8;
    fn read16(&mut self, addr: u32) -> u16;
    fn read32(&mut self, addr: u32) -> u32;

    fn write8(&mut self, addr: u32, value: u8);
    fn write16(&mut self, addr: u32, value: u16);
    fn write32(&mut self, addr: u32, value: u32);
}

/// Errors a single `execute` call can raise. None of these are retried —
/// the driver decides whether to halt or log-and-continue.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unimplemented THUMB opcode {0:#06x}")]
    UnimplementedOpcode(u16),
    #[error("software interrupt #{0:#04x}")]
    SoftwareInterrupt(u8),
    #[error("execute() called while CPSR.T is clear; ARM decoding is out of scope")]
    ArmModeUnsupported,
}

/// What happened after one `execute` call, beyond updating registers/memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Execution completed normally; the CPU is still in THUMB mode.
    Continue,
    /// A BX, or a POP into PC, loaded an address whose low bit was clear.
    /// The CPU has flipped CPSR.T to 0; the driver must stop calling
    /// `execute` in THUMB mode (ARM decoding is out of scope here).
    ModeSwitchToArm,
}

/// The full state the reference-log harness diffs against: which mode the
/// CPU is in, the opcode it is about to run, and every register including
/// CPSR (not just the sixteen general-purpose ones — NZCV and T live here
/// too, and scenarios in the conformance fixtures check them).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuSnapshot {
    pub mode: CpuMode,
    pub opcode: u32,
    pub regs: [u32; 16],
    pub cpsr: u32,
}

/// The ARM7TDMI core, restricted to its THUMB-mode behavior.
pub struct Arm7Tdmi {
    pub regs: Registers,
    last_opcode: u32,
}

impl Arm7Tdmi {
    pub fn new() -> Self {
        Self {
            regs: Registers::new(),
            last_opcode: 0,
        }
    }

    pub fn reset(&mut self) {
        self.regs = Registers::new();
        self.last_opcode = 0;
    }

    /// Read the halfword at `PC & !1` and advance PC by 2 (§6 `fetch`).
    pub fn fetch<M: MemoryBus>(&mut self, bus: &mut M) -> u16 {
        let pc = self.regs.pc() & !1;
        let opcode = bus.read16(pc);
        self.regs.set_pc(pc.wrapping_add(2));
        self.last_opcode = opcode as u32;
        opcode
    }

    /// Decode and run one THUMB opcode.
    pub fn execute<M: MemoryBus>(
        &mut self,
        opcode: u16,
        bus: &mut M,
    ) -> Result<StepOutcome, CoreError> {
        if !self.regs.is_thumb() {
            return Err(CoreError::ArmModeUnsupported);
        }
        crate::thumb::execute_thumb(&mut self.regs, bus, opcode)
    }

    /// `fetch` + `execute` in one call. spec.md's two primitives remain the
    /// contract the driver relies on; this is additive convenience.
    pub fn step<M: MemoryBus>(&mut self, bus: &mut M) -> Result<StepOutcome, CoreError> {
        let opcode = self.fetch(bus);
        self.execute(opcode, bus)
    }

    pub fn get_cpu_state(&self) -> CpuSnapshot {
        CpuSnapshot {
            mode: self.regs.cpu_mode(),
            opcode: self.last_opcode,
            regs: self.regs.r,
            cpsr: self.regs.cpsr,
        }
    }

    pub fn set_cpu_state(&mut self, state: CpuSnapshot) {
        self.regs.r = state.regs;
        self.regs.cpsr = state.cpsr;
        self.last_opcode = state.opcode;
    }
}

impl Default for Arm7Tdmi {
    fn default() -> Self {
        Self::new()
    }
}
