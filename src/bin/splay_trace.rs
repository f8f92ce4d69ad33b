//! Drive random splays over a random piece tree, checking every invariant
//! after each step.
//!
//! Usage: cargo run --features rand --bin splay_trace -- [seed] [pieces] [steps] [dot-file]
//!
//! Set RUST_LOG=trace to see every rotation and spine link. On an invariant
//! violation the offending offset sequence is printed and the process exits
//! non-zero; with a dot file the tree is dumped there after the last step
//! that ran.

use std::fs;
use std::process;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use vine::check::check_tree;
use vine::{dot, synth};

fn arg<T: std::str::FromStr>(args: &[String], index: usize, default: T) -> T {
    match args.get(index) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            eprintln!("could not parse argument {index}: {raw:?}");
            process::exit(2);
        }),
        None => default,
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let seed: u64 = arg(&args, 1, 0);
    let pieces: usize = arg(&args, 2, 64);
    let steps: usize = arg(&args, 3, 1000);
    let dot_path = args.get(4);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut tree = synth::random_tree(&mut rng, pieces, 16);
    let total = tree.len();
    println!("seed {seed}: {pieces} pieces, {total} units, {steps} splays");

    let mut offsets: Vec<usize> = Vec::with_capacity(steps);
    let mut depths = 0usize;
    let mut failed = false;
    for _ in 0..steps {
        // Mostly local moves around the last offset, with occasional jumps.
        let offset = match offsets.last() {
            Some(&last) if rng.gen_bool(0.8) => {
                let delta = rng.gen_range(0..=8usize);
                if rng.gen_bool(0.5) { last.saturating_sub(delta) } else { (last + delta).min(total) }
            }
            _ => rng.gen_range(0..=total),
        };
        offsets.push(offset);

        tree.splay_traced(offset, |step| {
            if let vine::SplayStep::Target { depth, .. } = step {
                depths += depth;
            }
        });

        if let Err(err) = check_tree(&tree) {
            eprintln!("invariant violated after {} splays: {err}", offsets.len());
            eprintln!("offsets: {offsets:?}");
            failed = true;
            break;
        }
    }

    if let Some(path) = dot_path {
        if let Err(err) = fs::write(path, dot::to_dot(&tree)) {
            eprintln!("could not write {path}: {err}");
            process::exit(2);
        }
        println!("wrote {path}");
    }

    if failed {
        process::exit(1);
    }
    let mean = depths as f64 / offsets.len().max(1) as f64;
    println!("ok: mean access depth {mean:.2}");
}
