//! Replays logged `{opcode, r0..r15, cpsr}` snapshots through the THUMB
//! interpreter and diffs the resulting state against the recorded successor.
//! Fixture values are taken from worked examples, not captured from a
//! reference emulator, but the format mirrors what such a log would look
//! like: decode once, execute once, compare every register and CPSR.

use gba_arm7tdmi::{Arm7Tdmi, CpuMode, CpuSnapshot, MemoryBus};
use gba_core::Bus;
use serde::Deserialize;

#[derive(Deserialize)]
struct State {
    regs: [u32; 16],
    cpsr: u32,
}

#[derive(Deserialize)]
struct Case {
    name: String,
    pre: State,
    opcode: u16,
    memory: Vec<(u32, u32)>,
    post: State,
}

fn run_case(case: &Case) {
    let mut bus = Bus::new();
    for &(addr, value) in &case.memory {
        bus.write32(addr, value);
    }

    let mut cpu = Arm7Tdmi::new();
    cpu.set_cpu_state(CpuSnapshot {
        mode: CpuMode::Thumb,
        opcode: case.opcode as u32,
        regs: case.pre.regs,
        cpsr: case.pre.cpsr,
    });

    // fetch() reads the opcode from the bus rather than trusting the fixture's
    // `opcode` field directly, so the PC-advance-by-2 side effect happens the
    // same way it would for any other instruction.
    bus.write16(cpu.regs.pc() & !1, case.opcode);
    let fetched = cpu.fetch(&mut bus);
    assert_eq!(fetched, case.opcode, "case {}: fetched wrong opcode", case.name);

    cpu.execute(fetched, &mut bus)
        .unwrap_or_else(|e| panic!("case {}: execute failed: {e}", case.name));

    assert_eq!(cpu.regs.r, case.post.regs, "case {}: register mismatch", case.name);
    assert_eq!(cpu.regs.cpsr, case.post.cpsr, "case {}: cpsr mismatch", case.name);
}

#[test]
fn thumb_conformance_fixture() {
    let raw = include_str!("fixtures/thumb_conformance.json");
    let cases: Vec<Case> = serde_json::from_str(raw).expect("fixture must parse");
    assert!(!cases.is_empty());
    for case in &cases {
        run_case(case);
    }
}

#[test]
fn push_then_pop_preserves_the_register_list() {
    // PUSH {r0,r1,r2,r4,r5,r7}, then POP the same list back.
    let mut bus = Bus::new();
    let mut cpu = Arm7Tdmi::new();
    cpu.regs.set_thumb(true);
    cpu.regs.set_sp(0x0500_0000);
    cpu.regs.r[0] = 0x1111_1111;
    cpu.regs.r[1] = 0x2222_2222;
    cpu.regs.r[2] = 0x3333_3333;
    cpu.regs.r[4] = 0x4444_4444;
    cpu.regs.r[5] = 0x5555_5555;
    cpu.regs.r[7] = 0x7777_7777;

    bus.write16(cpu.regs.pc() & !1, 0xB4B7);
    let push = cpu.fetch(&mut bus);
    cpu.execute(push, &mut bus).unwrap();
    assert_eq!(cpu.regs.sp(), 0x0500_0000 - 24);

    cpu.regs.r[0] = 0;
    cpu.regs.r[1] = 0;
    cpu.regs.r[2] = 0;
    cpu.regs.r[4] = 0;
    cpu.regs.r[5] = 0;
    cpu.regs.r[7] = 0;

    bus.write16(cpu.regs.pc() & !1, 0xBCB7);
    let pop = cpu.fetch(&mut bus);
    cpu.execute(pop, &mut bus).unwrap();

    assert_eq!(cpu.regs.sp(), 0x0500_0000);
    assert_eq!(cpu.regs.r[0], 0x1111_1111);
    assert_eq!(cpu.regs.r[1], 0x2222_2222);
    assert_eq!(cpu.regs.r[2], 0x3333_3333);
    assert_eq!(cpu.regs.r[4], 0x4444_4444);
    assert_eq!(cpu.regs.r[5], 0x5555_5555);
    assert_eq!(cpu.regs.r[7], 0x7777_7777);
}
