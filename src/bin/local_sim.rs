extern crate pmbot;

use std::collections::HashSet;

use log::{info, warn};
use rand::Rng;

use pmbot::*;

// Headless stand-in for the judge: rolls a random dungeon, feeds the
// strategy one turn at a time and applies its commands, then reports how
// the episode went.

struct SimDungeon {
    size: usize,
    princesses: Vec<Coord>,
    monsters: Vec<Coord>,
    knights: usize,
}

impl SimDungeon {
    fn gen_random(rng: &mut impl Rng) -> Self {
        let size = rng.gen_range(10..=30);

        // keep the corner cells free so nothing spawns inside an exit
        let mut taken: HashSet<Coord> = [
            Exit::TopLeft,
            Exit::TopRight,
            Exit::BottomRight,
            Exit::BottomLeft,
        ]
        .iter()
        .map(|exit| exit.corner(size))
        .collect();

        let princess_count = rng.gen_range(1..=size / 3);
        let monster_count = rng.gen_range(0..=size / 3);

        let princesses = (0..princess_count)
            .map(|_| random_cell(rng, size, &mut taken))
            .collect();
        let monsters = (0..monster_count)
            .map(|_| random_cell(rng, size, &mut taken))
            .collect();
        let knights = rng.gen_range(1..=2 * princess_count);

        SimDungeon {
            size,
            princesses,
            monsters,
            knights,
        }
    }
}

fn random_cell(rng: &mut impl Rng, size: usize, taken: &mut HashSet<Coord>) -> Coord {
    loop {
        let cell = Coord::new(rng.gen_range(0..size), rng.gen_range(0..size));
        if taken.insert(cell) {
            return cell;
        }
    }
}

struct EpisodeReport {
    rescued: usize,
    slain: usize,
    returned: usize,
    turns: usize,
}

fn run_episode(dungeon: &SimDungeon) -> EpisodeReport {
    let scenario = Scenario::new(
        dungeon.size,
        dungeon.princesses.clone(),
        dungeon.monsters.clone(),
        dungeon.knights,
    )
    .expect("generated dungeon should be valid");
    let mut strategy = Strategy::new(scenario);

    let mut positions: Vec<Coord> = strategy
        .entry_directions()
        .chars()
        .map(|label| {
            Exit::from_label(label)
                .expect("strategy emitted an unknown entry label")
                .corner(dungeon.size)
        })
        .collect();
    let mut inside = vec![true; dungeon.knights];
    let mut rescued = vec![false; dungeon.princesses.len()];
    let mut slain = vec![false; dungeon.monsters.len()];

    let max_turn = strategy.max_turn();
    let mut turn = 0;

    while turn < max_turn && inside.iter().any(|&stays| stays) {
        let status: Vec<i32> = inside.iter().map(|&stays| if stays { 1 } else { -1 }).collect();
        let princesses_left = rescued.iter().filter(|&&done| !done).count();
        let monsters_left = slain.iter().filter(|&&done| !done).count();

        let commands = strategy.play(&status, princesses_left, monsters_left, max_turn - turn);

        for (i, code) in commands.chars().enumerate() {
            if !inside[i] {
                continue;
            }
            let dir = Dir::from_code(code).expect("strategy emitted an unknown command");
            if dir == Dir::Stay {
                // lingering on an exit corner means leaving the dungeon
                if nearest_exit_distance(positions[i], dungeon.size) == 0 {
                    inside[i] = false;
                }
                continue;
            }
            positions[i] = positions[i].step(dir);

            for (p, &princess) in dungeon.princesses.iter().enumerate() {
                if positions[i] == princess {
                    rescued[p] = true;
                }
            }
            for (m, &monster) in dungeon.monsters.iter().enumerate() {
                if positions[i] == monster {
                    slain[m] = true;
                }
            }
        }
        turn += 1;
    }

    let returned = inside.iter().filter(|&&stays| !stays).count();
    if returned < dungeon.knights {
        warn!(
            "{} of {} knights still inside at the turn budget",
            dungeon.knights - returned,
            dungeon.knights
        );
    }

    EpisodeReport {
        rescued: rescued.iter().filter(|&&done| done).count(),
        slain: slain.iter().filter(|&&done| done).count(),
        returned,
        turns: turn,
    }
}

fn main() {
    env_logger::init();

    let mut rng = rand::thread_rng();

    for episode in 0..10 {
        let dungeon = SimDungeon::gen_random(&mut rng);
        info!(
            "episode {episode}: {}x{} grid, {} princesses, {} monsters, {} knights",
            dungeon.size,
            dungeon.size,
            dungeon.princesses.len(),
            dungeon.monsters.len(),
            dungeon.knights
        );

        let report = run_episode(&dungeon);
        info!(
            "episode {episode}: rescued {}/{}, slew {}/{}, {}/{} knights returned in {} turns",
            report.rescued,
            dungeon.princesses.len(),
            report.slain,
            dungeon.monsters.len(),
            report.returned,
            dungeon.knights,
            report.turns
        );
    }
}
