//! Execution routines for every THUMB form, grouped the way the teacher
//! splits ARM execution across data-processing / branch / load-store, plus
//! a `flags` module for the arithmetic and shift primitives every other
//! module builds on.

pub mod alu;
pub mod branch;
pub mod flags;
pub mod load_store;
