pub mod bus;
pub mod cartridge;
pub mod emulator;
pub mod memory;

pub use bus::Bus;
pub use cartridge::{load_rom_file, RomHeader};
pub use emulator::Emulator;
pub use memory::Memory;
