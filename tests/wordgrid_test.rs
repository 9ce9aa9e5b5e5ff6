use millrace::prelude::*;
use millrace::wordgrid::{self, Grid, Trie};

use std::collections::BTreeSet;
use std::sync::Arc;

const BOARD: &str = "uthe\nkefn\nwxrp\nolbz\n";

const FINDABLE: [&str; 9] = [
    "blow", "blower", "brew", "fern", "few", "hen", "her", "lower", "then",
];

// In the dictionary, but not spellable on the board.
const DECOYS: [&str; 7] = ["eel", "fox", "hunter", "knee", "loner", "pot", "reflex"];

fn dictionary() -> Trie {
    let mut trie = Trie::from_words(FINDABLE);
    for word in DECOYS {
        trie.insert(word);
    }
    trie
}

#[test]
fn test_small_known_board() {
    let grid: Grid = BOARD.parse().unwrap();

    let found = wordgrid::solve(&grid, &dictionary());

    let expected: BTreeSet<String> = FINDABLE.iter().map(|w| w.to_string()).collect();
    assert_eq!(found, expected);
}

#[test]
fn test_ragged_board_is_rejected() {
    let result: millrace::Result<Grid> = "uthe\nkefn\nwxr\n".parse();
    assert!(matches!(result, Err(Error::Grid(_))));
}

#[test]
fn test_sharded_solve_matches_direct_solve() {
    let grid: Arc<Grid> = Arc::new(BOARD.parse().unwrap());
    let dictionary = Arc::new(dictionary());

    let config = Config::builder().workers(4).build().unwrap();
    let dispatcher = Dispatcher::with_config(config).unwrap();

    // One task per starting cell; the union of the shards must equal a
    // whole-grid solve.
    let mut handles = Vec::new();
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            let grid = grid.clone();
            let dictionary = dictionary.clone();
            handles.push(
                dispatcher.submit(move || wordgrid::solve_from(&grid, &dictionary, (x, y))),
            );
        }
    }

    let workers = dispatcher.spawn_pool().unwrap();
    dispatcher.finish();

    let mut found = BTreeSet::new();
    for handle in handles {
        found.extend(handle.join().unwrap());
    }
    for worker in workers {
        assert_eq!(worker.join().unwrap(), Outcome::Finished);
    }

    assert_eq!(found, wordgrid::solve(&grid, &dictionary));
    assert_eq!(dispatcher.stats().tasks_executed, 16);
}
