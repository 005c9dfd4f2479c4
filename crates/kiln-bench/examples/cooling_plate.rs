//! End-to-end diffusion example.
//!
//! Demonstrates: build config → HeatSolver → step → read reports → snapshot
//! history through a recorder.

use kiln_bench::{hot_spot_profile, reference_profile};
use kiln_core::StepId;
use kiln_grid::Grid;
use kiln_solver::{HeatSolver, MemoryRecorder};

fn mean(grid: &Grid<f64>) -> f64 {
    grid.iter().sum::<f64>() / grid.len() as f64
}

fn main() {
    println!("=== Kiln Cooling Plate Example ===\n");

    // --- Episode 1: noisy plate smooths out ---
    println!("Episode 1: 100x100 noisy plate, 200 steps");
    let mut solver = HeatSolver::new(reference_profile(42)).unwrap();
    println!(
        "  dt = {:.3} (stability limit {:.3})",
        solver.dt(),
        solver.max_dt()
    );

    for step in 1..=200u64 {
        let report = solver.step().unwrap();
        if step % 50 == 0 || step == 1 {
            println!(
                "  step {:>3}: t = {:>7.2}, max = {:>7.4}, mean = {:>7.4}",
                report.step.0,
                report.time,
                report.max_abs,
                mean(solver.field()),
            );
        }
    }

    // --- Episode 2: hot spot drains away, recorded every 100 steps ---
    println!("\nEpisode 2: hot spot on a 51x51 cold plate, 500 steps");
    let mut solver = HeatSolver::new(hot_spot_profile(51, 1000.0)).unwrap();
    let mut recorder = MemoryRecorder::with_capacity(5);
    solver.run_with_sink(500, 100, &mut recorder).unwrap();

    for (step, snapshot) in recorder.iter() {
        let grid = snapshot.grid();
        println!(
            "  step {:>3}: t = {:>8.2}, peak = {:>8.3}, total heat = {:>9.3}",
            step.0,
            snapshot.time(),
            grid.max_abs(),
            grid.iter().sum::<f64>(),
        );
    }

    solver.finalize();
    let last = recorder.get(StepId(500)).unwrap();
    println!(
        "\nFinal step: {} (center cooled from 1000 to {:.3})",
        last.step(),
        last.grid()[(25, 25)]
    );
    println!("Done.");
}
