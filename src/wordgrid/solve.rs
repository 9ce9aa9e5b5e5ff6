//! Depth-first word search over grid paths.

use std::collections::BTreeSet;

use crate::wordgrid::grid::Grid;
use crate::wordgrid::trie::Trie;

/// The eight directions a path may step in.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Every dictionary word spellable by a path of neighboring cells that
/// never revisits a cell.
///
/// Depth-first search over all legal paths, pruned hard: a path is
/// extended only while some dictionary word starts with its letters.
pub fn solve(grid: &Grid, dictionary: &Trie) -> BTreeSet<String> {
    // Working state is shared across the whole search and modified in
    // place; each recursive call restores it on the way out.
    let mut word = String::new();
    let mut path = Vec::new();
    let mut found = BTreeSet::new();

    for x in 0..grid.width() {
        for y in 0..grid.height() {
            extend_path(
                grid,
                dictionary,
                &mut word,
                &mut path,
                (x as isize, y as isize),
                &mut found,
            );
        }
    }

    found
}

/// [`solve`], restricted to paths starting at one cell.
///
/// The per-cell unit of work when a search is split across workers; the
/// union over all cells equals [`solve`] on the whole grid.
pub fn solve_from(grid: &Grid, dictionary: &Trie, start: (usize, usize)) -> BTreeSet<String> {
    let mut word = String::new();
    let mut path = Vec::new();
    let mut found = BTreeSet::new();

    extend_path(
        grid,
        dictionary,
        &mut word,
        &mut path,
        (start.0 as isize, start.1 as isize),
        &mut found,
    );

    found
}

fn extend_path(
    grid: &Grid,
    node: &Trie,
    word: &mut String,
    path: &mut Vec<(isize, isize)>,
    next: (isize, isize),
    found: &mut BTreeSet<String>,
) {
    let (x, y) = next;

    // Off the grid: illegal path
    if x < 0 || y < 0 {
        return;
    }
    let letter = match grid.get(x as usize, y as usize) {
        Some(letter) => letter,
        None => return,
    };

    // Already used this cell for the word so far: illegal path
    if path.contains(&next) {
        return;
    }

    // No dictionary word starts with the extended sequence: prune
    let child = match node.child(letter) {
        Some(child) => child,
        None => return,
    };

    word.push(letter);
    path.push(next);

    if child.is_word() {
        found.insert(word.clone());
    }

    for (dx, dy) in NEIGHBOR_OFFSETS {
        extend_path(grid, child, word, path, (x + dx, y + dy), found);
    }

    // Put the working state back how we found it
    path.pop();
    word.pop();
}
