//! Decoder and arbiter working together against one SRAM.

use nes_bus::{MemoryController, PpuMemoryMap, Sram};
use sim_core::{Component, Phase, TestBench};

#[test]
fn display_fetch_routes_through_the_fabric() {
    let mut sram = Sram::new();
    sram.write(0x0123, 0x42); // pattern byte
    sram.write(0x2456, 0x24); // name byte

    let mut bench = TestBench::new(MemoryController::new());
    bench.on_settle(move |controller| {
        if controller.o_mem_en() && !controller.o_mem_wr() {
            controller.i_mem_data = sram.read(controller.o_mem_address());
        }
    });
    bench.reset();

    // The decoder splits one display-domain request across the two
    // controller ports.
    let mut map = PpuMemoryMap::new();
    map.i_re = true;

    map.i_address = 0x0123;
    bench.core.ppu_pattern.i_en = map.cs_pattern();
    bench.core.ppu_pattern.i_address = map.o_address();
    bench.core.ppu_name.i_en = map.cs_name();
    bench.tick();
    assert_eq!(bench.core.ppu_pattern.data(), 0x42);

    // Mirrored name-table address folds down before arbitration.
    map.i_address = 0x3456;
    bench.core.ppu_pattern.i_en = map.cs_pattern();
    bench.core.ppu_name.i_en = map.cs_name();
    bench.core.ppu_name.i_address = map.o_address();
    bench.tick();
    assert_eq!(bench.core.ppu_name.data(), 0x24);
    assert_eq!(bench.core.ppu_pattern.data(), 0x42, "pattern port undisturbed");

    assert_eq!(bench.core.phase(), Phase::Phi1);
}
