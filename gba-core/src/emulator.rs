use crate::bus::Bus;
use crate::cartridge::RomHeader;
use gba_arm7tdmi::{Arm7Tdmi, CoreError, CpuSnapshot, StepOutcome};

/// Ties the CPU interpreter to its memory map. Sequencing frames, cycle
/// budgeting, and every subsystem that would hang off the I/O window are
/// the outer driver's job; this only wires fetch/execute to a backing bus.
pub struct Emulator {
    pub cpu: Arm7Tdmi,
    pub bus: Bus,
}

impl Emulator {
    pub fn new() -> Self {
        Self {
            cpu: Arm7Tdmi::new(),
            bus: Bus::new(),
        }
    }

    pub fn load_bios(&mut self, bios: Vec<u8>) {
        self.bus.load_bios(bios);
    }

    /// Load ROM bytes into the cartridge window, logging the parsed title.
    pub fn load_rom(&mut self, rom: &[u8]) -> usize {
        if let Ok(header) = RomHeader::parse(rom) {
            log::info!("loaded ROM: {}", header.title);
        }
        self.bus.load_rom(rom)
    }

    pub fn reset(&mut self) {
        self.cpu.reset();
        self.cpu.regs.set_pc(0x0800_0000);
    }

    /// Run one fetch/execute cycle.
    pub fn step(&mut self) -> Result<StepOutcome, CoreError> {
        self.cpu.step(&mut self.bus)
    }

    pub fn get_cpu_state(&self) -> CpuSnapshot {
        self.cpu.get_cpu_state()
    }

    pub fn set_cpu_state(&mut self, state: CpuSnapshot) {
        self.cpu.set_cpu_state(state);
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}
