//! Example: drive the visualizer facade on a virtual clock.
//!
//! Run with:
//! `cargo run --example playback`

use std::time::Duration;

use algo_stepper::{ManualScheduler, Status, Style, VisualizerBuilder};

fn main() {
    let mut vis = VisualizerBuilder::new(ManualScheduler::new())
        .with_algorithm("insertion-sort")
        .with_speed(4.0)
        .build()
        .unwrap();

    let info = vis.algorithm().info();
    println!("{} ({} average, {} space)", info.name, info.time_complexity, info.space_complexity);

    vis.play().unwrap();
    loop {
        vis.scheduler_mut().advance(Duration::from_millis(250));
        let Some(frame) = vis.pump().unwrap() else {
            break;
        };
        let highlighted: Vec<usize> = frame
            .current_annotations
            .iter()
            .filter(|a| a.style != Style::Normal)
            .flat_map(|a| a.target_positions.iter().copied())
            .collect();
        println!(
            "{:>3}/{} {:?} highlight {:?}",
            frame.playback_state.cursor,
            frame.playback_state.trace_len,
            frame.current_snapshot.keys().unwrap_or(&[]),
            highlighted
        );
        if frame.playback_state.status == Status::Finished {
            break;
        }
    }

    // Scrub backwards, then jump into the middle.
    let back = vis.step_back().unwrap();
    println!("back to {}: {:?}", back.playback_state.cursor, back.current_snapshot.keys());
    let mid = vis.controller().trace().map_or(0, |t| t.len() as isize / 2);
    let frame = vis.seek(mid).unwrap();
    println!("seek {mid}: {:?}", frame.current_snapshot.keys());

    // Bad input is reported, not fatal.
    let update = vis.select_algorithm("binary-search").unwrap();
    let update = match update.frame() {
        Some(_) => vis.set_input(algo_stepper::Input::search(vec![9, 3, 5], 3)).unwrap(),
        None => update,
    };
    if let Some(msg) = update.rejection() {
        println!("{}: {}", msg.kind, msg.message);
    }
}
