//! Contiguity under long mixed operation sequences: whatever order of
//! add/remove/duplicate/reorder runs, positions stay a permutation of
//! `0..n-1`.

use sitecraft_catalog::{BlockType, Catalog};
use sitecraft_editor::{EditorSession, Mutation};

/// Deterministic pseudo-random stream (keeps the test reproducible
/// without pulling a rng into dev-dependencies)
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn pick(&mut self, bound: usize) -> usize {
        (self.next() as usize) % bound.max(1)
    }
}

fn assert_contiguous(session: &EditorSession) {
    let mut seen: Vec<usize> = session.blocks().iter().map(|b| b.position).collect();
    seen.sort_unstable();
    let expected: Vec<usize> = (0..session.blocks().len()).collect();
    assert_eq!(seen, expected, "positions must be exactly 0..n-1");
}

#[test]
fn test_positions_stay_contiguous_over_mixed_sequences() {
    let catalog = Catalog::new();
    let types = [
        BlockType::Header,
        BlockType::Text,
        BlockType::Image,
        BlockType::List,
        BlockType::Booking,
    ];

    for seed in 1..=8u64 {
        let mut rng = Lcg(seed);
        let mut session = EditorSession::new(Vec::new());

        for step in 0..200 {
            let roll = rng.pick(100);
            let n = session.blocks().len();

            let outcome = if n == 0 || roll < 35 {
                session.apply(&catalog, Mutation::AddBlock {
                    block_type: types[rng.pick(types.len())],
                })
            } else if roll < 55 {
                let id = session.blocks()[rng.pick(n)].id;
                session.apply(&catalog, Mutation::RemoveBlock { id })
            } else if roll < 70 {
                let id = session.blocks()[rng.pick(n)].id;
                session.apply(&catalog, Mutation::DuplicateBlock { id })
            } else if roll < 90 {
                let id = session.blocks()[rng.pick(n)].id;
                session.apply(&catalog, Mutation::ReorderBlock {
                    id,
                    new_position: rng.pick(n + 2), // sometimes past the end, must clamp
                })
            } else {
                session.apply(&catalog, Mutation::InsertBlock {
                    block_type: types[rng.pick(types.len())],
                    position: rng.pick(n + 2),
                })
            };

            outcome.unwrap_or_else(|e| panic!("seed {seed} step {step}: {e}"));
            assert_contiguous(&session);
        }
    }
}

#[test]
fn test_contiguity_survives_undo_redo_interleaving() {
    let catalog = Catalog::new();
    let mut rng = Lcg(42);
    let mut session = EditorSession::new(Vec::new());

    for _ in 0..150 {
        match rng.pick(4) {
            0 => {
                session
                    .apply(&catalog, Mutation::AddBlock {
                        block_type: BlockType::Text,
                    })
                    .unwrap();
            }
            1 if !session.blocks().is_empty() => {
                let id = session.blocks()[rng.pick(session.blocks().len())].id;
                session.apply(&catalog, Mutation::RemoveBlock { id }).unwrap();
            }
            2 => {
                session.undo();
            }
            _ => {
                session.redo();
            }
        }
        assert_contiguous(&session);
    }
}
