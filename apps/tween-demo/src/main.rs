use std::cell::Cell;
use std::io::{self, Write};
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use tween_animation::{ScalarInterpolator, TweenSpec, Vec2, VectorInterpolator};
use tween_runtime_std::StdRuntime;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const BAR_WIDTH: usize = 40;
const RUNS: u32 = 3;

fn render_bar(progress: f64) -> String {
    let filled = (progress.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), " ".repeat(BAR_WIDTH - filled))
}

fn main() {
    env_logger::init();

    println!("=== Tween-RS Terminal Example ===");
    println!("A progress bar and a point tween side by side at ~60 fps.");
    println!("The bar restarts {RUNS} times from its completion callback.");
    println!();

    let runtime = StdRuntime::new();
    let clock = runtime.frame_clock();

    let bar = match ScalarInterpolator::try_new(&clock, 0.0, 1.0, TweenSpec::tween(600)) {
        Ok(bar) => bar,
        Err(err) => {
            log::error!("failed to create progress tween: {err}");
            return;
        }
    };
    let point = VectorInterpolator::new(
        &clock,
        Vec2::new(0.0, 100.0),
        Vec2::new(100.0, 0.0),
        TweenSpec::new(None, true),
    );

    let runs = Rc::new(Cell::new(0u32));
    {
        let runs = runs.clone();
        bar.set_on_complete(move |finished| {
            runs.set(runs.get() + 1);
            log::info!("progress run {} complete", runs.get());
            if runs.get() < RUNS {
                finished.start();
            } else {
                finished.stop();
            }
        });
    }
    point.set_on_complete(|finished| {
        log::info!("point reached {:?}", finished.to());
        finished.stop();
    });
    bar.start();

    let stdout = io::stdout();
    while runtime.needs_frame() {
        thread::sleep(FRAME_INTERVAL);
        runtime.pump_frame();

        let progress = bar.value();
        let position = point.value();
        let mut out = stdout.lock();
        if let Err(err) = write!(
            out,
            "\r{} {:>5.1}%  point ({:>6.2}, {:>6.2})",
            render_bar(progress),
            progress * 100.0,
            position.x,
            position.y,
        )
        .and_then(|_| out.flush())
        {
            log::error!("failed to write frame: {err}");
            return;
        }
    }

    println!();
    println!("Done after {} runs.", runs.get());
}
