//! Runs every search strategy across a random cave and prints the results.
//!
//! Run: cargo run --bin compare -- [seed] [wall-percent]

use rand::SeedableRng;
use waypath_demos::{HEIGHT, WIDTH, cave, compare, render};
use waypath_search::DEFAULT_MAX_ITERS;

fn main() {
    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let wall_pct = args
        .next()
        .and_then(|s| s.parse::<f64>().ok())
        .map_or(0.3, |pct| pct / 100.0);

    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut world = match cave(WIDTH, HEIGHT, false, wall_pct, &mut rng) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    println!("seed {seed}, {:.0}% walls", wall_pct * 100.0);
    println!("{}", render(&world.grid));

    let reports = compare(&world.grid, world.start, world.end, DEFAULT_MAX_ITERS);
    for r in &reports {
        if r.outcome.is_success() {
            println!(
                "{:<24} {:>3} nodes  cost {:>5.1}  {:>5} iterations",
                r.strategy.to_string(),
                r.outcome.path.len(),
                r.cost,
                r.outcome.iterations
            );
        } else {
            println!(
                "{:<24} no path           {:>5} iterations",
                r.strategy.to_string(),
                r.outcome.iterations
            );
        }
    }

    // Show the cheapest path found.
    let best = reports
        .iter()
        .filter(|r| r.outcome.is_success())
        .min_by(|a, b| a.cost.total_cmp(&b.cost));
    if let Some(best) = best {
        world.grid.mark_path(&best.outcome.path);
        println!("\n{}:", best.strategy);
        print!("{}", render(&world.grid));
    }
}
