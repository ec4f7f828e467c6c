use super::*;

use log::{debug, trace};

/// Stateful decision core. Built once per game from a [`Scenario`], then
/// queried by the judge for one command per knight per turn via [`play`].
///
/// [`play`]: Strategy::play
pub struct Strategy {
    size: usize,
    max_turn: usize,
    turn: usize,
    center: Coord,
    princesses: Vec<Coord>,
    monsters: Vec<Coord>,
    knights: Vec<Knight>,
    active: RescueQueue,
    entry: String,
}

impl Strategy {
    pub fn new(scenario: Scenario) -> Self {
        let Scenario {
            size,
            princesses,
            monsters,
            knights,
        } = scenario;
        debug!(
            "{} princesses, {} monsters, {} knights on a {size}x{size} grid",
            princesses.len(),
            monsters.len(),
            knights
        );

        let distances: Vec<Vec<usize>> = princesses
            .iter()
            .map(|&p| monsters.iter().map(|&m| p.manhattan(m)).collect())
            .collect();

        // A princess far from every monster but deep in the dungeon is the
        // most valuable pick: safe to reach, expensive to skip.
        let mut active = RescueQueue::new();
        let mut buffer = RescueQueue::new();
        for (i, &princess) in princesses.iter().enumerate() {
            let exit_dist = nearest_exit_distance(princess, size) as f64;
            let total: usize = distances[i].iter().sum();
            let score = if total == 0 {
                // no monsters to weigh in (or all of them share her cell)
                exit_dist
            } else {
                let mean = total as f64 / monsters.len() as f64;
                exit_dist / mean
            };
            debug!("princess [{i}] priority: {score:.3}");
            active.push(i, score);
        }

        let center = Coord::new(size / 2, size / 2);
        let mut fleet = Vec::with_capacity(knights);
        let mut entry = String::with_capacity(knights);

        // First pass: hand out princesses in priority order, one knight each.
        while fleet.len() < knights {
            match active.pop() {
                Some(top) => enlist_rescuer(top, &princesses, size, &mut fleet, &mut entry, &mut buffer),
                None => break,
            }
        }

        // Spare knights double up on princesses, cheapest decays dropping out
        // as the two queues swap roles each round.
        if fleet.len() < knights {
            while !buffer.is_empty() && fleet.len() < knights {
                std::mem::swap(&mut active, &mut buffer);
                while fleet.len() < knights {
                    match active.pop() {
                        Some(top) if top.score >= RESCUE_THRESHOLD => {
                            enlist_rescuer(top, &princesses, size, &mut fleet, &mut entry, &mut buffer)
                        }
                        Some(_) => continue,
                        None => break,
                    }
                }
            }
        }

        // Whoever is left opens the hunt on the first monster.
        while fleet.len() < knights {
            let (start, task) = match monsters.first() {
                Some(&first) => (nearest_exit(first, size), Task::Hunt(0)),
                // no monsters either: walk in and straight back out
                None => (nearest_exit(center, size), Task::Gather),
            };
            fleet.push(Knight::new(start.corner(size), task));
            entry.push(start.label());
        }

        debug!(
            "assignment: {:?}",
            fleet.iter().map(|k| k.task).collect::<Vec<_>>()
        );

        Strategy {
            size,
            max_turn: size * size * size,
            turn: 0,
            center,
            princesses,
            monsters,
            knights: fleet,
            active,
            entry,
        }
    }

    /// One entry label per knight, in the clockwise compass encoding.
    pub fn entry_directions(&self) -> &str {
        &self.entry
    }

    pub fn knights(&self) -> &[Knight] {
        &self.knights
    }

    pub fn max_turn(&self) -> usize {
        self.max_turn
    }

    /// Produces one command character per knight for the current turn.
    /// `status` is the judge's view: positive means the knight is still in
    /// the dungeon, anything else gets a bare stay.
    pub fn play(
        &mut self,
        status: &[i32],
        princesses_left: usize,
        monsters_left: usize,
        turns_left: usize,
    ) -> String {
        debug_assert_eq!(status.len(), self.knights.len());
        trace!(
            "turn {}: {princesses_left} princesses / {monsters_left} monsters left, {turns_left} turns to go",
            self.turn
        );

        let mut commands = String::with_capacity(self.knights.len());
        for i in 0..self.knights.len() {
            if status[i] <= 0 {
                commands.push(Dir::Stay.code());
                continue;
            }
            commands.push(self.resolve(i, status).code());
        }

        self.turn += 1;
        debug!("turn {}: {commands}", self.turn);
        commands
    }

    /// Settles knight `i` for this turn: applies any pending task switches
    /// and returns the one real command (a step or a stay). Task switches on
    /// arrival cost no turn, so this keeps re-dispatching until a command
    /// falls out.
    fn resolve(&mut self, i: usize, status: &[i32]) -> Dir {
        let exit_dist = nearest_exit_distance(self.knights[i].pos, self.size) as i64;
        if exit_dist > self.max_turn as i64 - self.turn as i64 + 5 {
            // cutting it close on the turn budget, drop everything and leave
            self.knights[i].task = Task::Exit;
        }

        loop {
            let Knight { pos, task } = self.knights[i];
            match task {
                Task::Rescue(p) => {
                    let dir = step_toward(pos, self.princesses[p]);
                    if dir != Dir::Stay {
                        trace!("knight {i} rescuing princess {p}");
                        self.apply(i, dir);
                        return dir;
                    }
                    // princess reached: take the next one still worth a
                    // knight, at a discount, or start heading home
                    match self.active.peek().copied() {
                        Some(top) if top.score >= RESCUE_THRESHOLD => {
                            self.active.pop();
                            self.active.push(top.princess, top.score - RESCUE_THRESHOLD);
                            self.knights[i].task = Task::Rescue(top.princess);
                        }
                        _ => self.knights[i].task = Task::Gather,
                    }
                }
                Task::Hunt(m) => {
                    let dir = step_toward(pos, self.monsters[m]);
                    if dir != Dir::Stay {
                        trace!("knight {i} hunting monster {m}");
                        self.apply(i, dir);
                        return dir;
                    }
                    match self.next_monster(m) {
                        Some(next) => {
                            // the whole hunting line jumps to the new target
                            for j in 0..self.knights.len() {
                                if j != i && status[j] > 0 && self.knights[j].task == Task::Hunt(m)
                                {
                                    self.knights[j].task = Task::Hunt(next);
                                }
                            }
                            self.knights[i].task = Task::Hunt(next);
                        }
                        None => self.knights[i].task = Task::Gather,
                    }
                }
                Task::Gather => {
                    let dir = step_toward(pos, self.center);
                    if dir != Dir::Stay {
                        trace!("knight {i} gathering");
                        self.apply(i, dir);
                        return dir;
                    }
                    let center = self.center;
                    let waiting = self.knights.iter().enumerate().any(|(j, knight)| {
                        j != i
                            && status[j] > 0
                            && knight.task == Task::Gather
                            && knight.pos.manhattan(center) > 0
                    });
                    if waiting {
                        trace!("knight {i} waiting at the center");
                        return Dir::Stay;
                    }
                    self.knights[i].task = Task::Exit;
                }
                Task::Exit => {
                    trace!("knight {i} exiting");
                    let home = nearest_exit(pos, self.size).corner(self.size);
                    let dir = step_toward(pos, home);
                    self.apply(i, dir);
                    return dir;
                }
            }
        }
    }

    /// Next monster on the line after `current`, skipping any camped within
    /// distance 2 of an exit. `None` once the line is finished.
    fn next_monster(&self, current: usize) -> Option<usize> {
        self.monsters
            .iter()
            .enumerate()
            .skip(current + 1)
            .find(|&(_, &pos)| nearest_exit_distance(pos, self.size) >= 2)
            .map(|(idx, _)| idx)
    }

    fn apply(&mut self, i: usize, dir: Dir) {
        let knight = &mut self.knights[i];
        knight.pos = knight.pos.step(dir);
    }
}

fn enlist_rescuer(
    top: RescuePriority,
    princesses: &[Coord],
    size: usize,
    fleet: &mut Vec<Knight>,
    entry: &mut String,
    buffer: &mut RescueQueue,
) {
    let start = nearest_exit(princesses[top.princess], size);
    fleet.push(Knight::new(start.corner(size), Task::Rescue(top.princess)));
    entry.push(start.label());
    buffer.push(top.princess, top.score - RESCUE_THRESHOLD);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy(
        size: usize,
        princesses: &[(usize, usize)],
        monsters: &[(usize, usize)],
        knights: usize,
    ) -> Strategy {
        let princesses = princesses.iter().map(|&(r, c)| Coord::new(r, c)).collect();
        let monsters = monsters.iter().map(|&(r, c)| Coord::new(r, c)).collect();
        Strategy::new(Scenario::new(size, princesses, monsters, knights).unwrap())
    }

    fn play_turns(strategy: &mut Strategy, turns: usize) -> Vec<String> {
        let alive = vec![1; strategy.knights.len()];
        (0..turns)
            .map(|_| strategy.play(&alive, 0, 0, 1000))
            .collect()
    }

    #[test]
    fn every_princess_gets_a_knight_when_the_fleet_is_large_enough() {
        let strategy = strategy(15, &[(2, 2), (12, 3), (7, 9)], &[(5, 5)], 7);

        let mut rescued = [false; 3];
        for knight in strategy.knights() {
            if let Task::Rescue(p) = knight.task {
                rescued[p] = true;
            }
        }
        assert_eq!(rescued, [true, true, true]);
        // the spare knight at the end opens the monster hunt
        assert_eq!(strategy.knights()[6].task, Task::Hunt(0));
    }

    #[test]
    fn zero_knights_is_a_no_op() {
        let mut strategy = strategy(10, &[(1, 1)], &[], 0);
        assert_eq!(strategy.entry_directions(), "");
        assert_eq!(strategy.play(&[], 1, 0, 100), "");
    }

    #[test]
    fn lone_knight_rescues_gathers_and_exits() {
        // Princess on the bottom-right corner cell: the knight enters on top
        // of her, regroups at the center and walks back out.
        let mut strategy = strategy(10, &[(9, 9)], &[], 1);
        assert_eq!(strategy.entry_directions(), "S");

        let commands = play_turns(&mut strategy, 17).concat();
        assert_eq!(commands, "WWWWNNNNEEEESSSS0");
        assert_eq!(strategy.knights()[0].task, Task::Exit);
        assert_eq!(strategy.knights()[0].pos, Coord::new(9, 9));
    }

    #[test]
    fn approach_is_monotone_and_l_shaped() {
        let mut strategy = strategy(10, &[(2, 6)], &[], 1);
        assert_eq!(strategy.entry_directions(), "E");

        let princess = Coord::new(2, 6);
        let mut pos = Coord::new(0, 9);
        assert_eq!(strategy.knights()[0].pos, pos);

        for command in play_turns(&mut strategy, 5) {
            let dir = match command.as_bytes()[0] {
                b'W' => Dir::Left,
                b'S' => Dir::Down,
                other => panic!("unexpected command {other} on the approach"),
            };
            let next = pos.step(dir);
            assert_eq!(next.manhattan(princess) + 1, pos.manhattan(princess));
            pos = next;
        }
        assert_eq!(pos, princess);
    }

    #[test]
    fn finished_rescuer_takes_the_best_remaining_princess() {
        // One knight, three princesses; (1,1) and (8,8) tie on priority so
        // the lower index must win both times it is contested.
        let mut strategy = strategy(10, &[(1, 1), (5, 5), (8, 8)], &[], 1);
        assert_eq!(strategy.knights()[0].task, Task::Rescue(1));

        play_turns(&mut strategy, 9);
        assert_eq!(strategy.knights()[0].task, Task::Rescue(0));

        play_turns(&mut strategy, 8);
        assert_eq!(strategy.knights()[0].task, Task::Rescue(2));
    }

    #[test]
    fn spare_knights_head_home_when_there_are_no_monsters() {
        let strategy = strategy(10, &[(0, 1)], &[], 3);

        assert_eq!(strategy.entry_directions(), "NNS");
        let tasks: Vec<_> = strategy.knights().iter().map(|k| k.task).collect();
        assert_eq!(tasks, vec![Task::Rescue(0), Task::Rescue(0), Task::Gather]);
    }

    #[test]
    fn hunting_line_jumps_to_the_next_monster_together() {
        // Monster 1 sits next to an exit and must be skipped by everyone.
        let mut strategy = strategy(12, &[], &[(6, 6), (1, 0), (3, 3)], 3);
        assert_eq!(strategy.entry_directions(), "SSS");
        assert!(strategy
            .knights()
            .iter()
            .all(|k| k.task == Task::Hunt(0)));

        // 10 turns in lockstep to (6,6), the 11th resolves the arrival
        let mut visited_skipped = false;
        for _ in 0..11 {
            play_turns(&mut strategy, 1);
            visited_skipped |= strategy.knights().iter().any(|k| k.pos == Coord::new(1, 0));
        }
        assert!(strategy.knights().iter().all(|k| k.task == Task::Hunt(2)));

        for _ in 0..40 {
            play_turns(&mut strategy, 1);
            visited_skipped |= strategy.knights().iter().any(|k| k.pos == Coord::new(1, 0));
        }
        assert!(!visited_skipped);
        assert!(strategy.knights().iter().all(|k| k.task == Task::Exit));
    }

    #[test]
    fn knight_at_the_center_waits_for_gathering_stragglers() {
        let mut strategy = strategy(10, &[(5, 4), (0, 1)], &[], 2);

        // knight 0 reaches the center on turn 8; knight 1 is still walking
        play_turns(&mut strategy, 9);
        let commands = play_turns(&mut strategy, 1).concat();
        assert_eq!(commands, "0S");

        // both at the center now: everyone switches to the exit walk
        play_turns(&mut strategy, 1);
        assert_eq!(strategy.knights()[0].task, Task::Exit);
        assert_eq!(strategy.knights()[1].task, Task::Exit);
    }

    #[test]
    fn turn_budget_forces_an_early_exit_and_sticks() {
        let mut strategy = strategy(10, &[(5, 4)], &[], 1);

        // walk in for a while, then pretend the budget is nearly gone
        play_turns(&mut strategy, 6);
        assert_eq!(strategy.knights()[0].pos, Coord::new(7, 4));
        strategy.turn = strategy.max_turn + 2;

        let commands = play_turns(&mut strategy, 1).concat();
        assert_eq!(commands, "W");
        assert_eq!(strategy.knights()[0].task, Task::Exit);

        // terminal: nothing moves it off Exit, and it parks on the corner
        let trailing = play_turns(&mut strategy, 12);
        assert_eq!(strategy.knights()[0].task, Task::Exit);
        assert_eq!(strategy.knights()[0].pos, Coord::new(9, 0));
        assert_eq!(trailing.last().unwrap(), "0");
    }

    #[test]
    fn inactive_knights_only_ever_stay() {
        let mut strategy = strategy(10, &[(4, 4), (5, 5)], &[], 2);
        let commands = strategy.play(&[-1, 1], 2, 0, 900);
        assert_eq!(commands, "0W");
        // the dropped knight never moved off its entry corner
        assert_eq!(strategy.knights()[0].pos, Coord::new(0, 0));
    }
}
