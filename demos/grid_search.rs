//! Sharded word search: one task per starting cell, merged at the end

use millrace::prelude::*;
use millrace::wordgrid::{solve_from, Grid, Trie};

use std::collections::BTreeSet;
use std::sync::Arc;

const BOARD: &str = "uthe\nkefn\nwxrp\nolbz\n";

const DICTIONARY: &[&str] = &[
    "blow", "blower", "brew", "eel", "fern", "few", "fox", "hen", "her", "hunter", "knee",
    "loner", "lower", "pot", "reflex", "then",
];

fn main() {
    let grid: Arc<Grid> = Arc::new(BOARD.parse().expect("board parses"));
    let dictionary = Arc::new(Trie::from_words(DICTIONARY.iter().copied()));

    println!("=== Grid Word Search ===\n");
    println!("{}", grid);

    let dispatcher = Dispatcher::new();
    let workers = dispatcher.spawn_pool().expect("workers spawn");

    let mut shards = Vec::new();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let grid = Arc::clone(&grid);
            let dictionary = Arc::clone(&dictionary);
            shards.push(dispatcher.submit(move || solve_from(&grid, &dictionary, (x, y))));
        }
    }
    dispatcher.finish();

    let mut found = BTreeSet::new();
    for shard in shards {
        found.extend(shard.join().expect("shard completes"));
    }
    for worker in workers {
        worker.join().expect("worker exits cleanly");
    }

    println!("Found {} words:", found.len());
    for word in &found {
        println!("  {}", word);
    }

    let stats = dispatcher.stats();
    println!(
        "\n{} shards searched in {:?} ({:.0} tasks/sec)",
        stats.tasks_executed,
        stats.uptime,
        stats.throughput()
    );
}
