pub mod cpu;
pub mod instructions;
pub mod registers;
pub mod thumb;

pub use cpu::{Arm7Tdmi, CoreError, CpuSnapshot, MemoryBus, StepOutcome};
pub use registers::{CpuMode, Registers, StatusFlags};
