extern crate pmbot;

use std::io::{self, Write};

use pmbot::{Scenario, Strategy};

macro_rules! parse_input {
    ($x:expr, $t:ident) => {
        $x.trim().parse::<$t>().unwrap()
    };
}

fn read_line() -> Option<String> {
    let mut input_line = String::new();
    match io::stdin().read_line(&mut input_line) {
        Ok(0) => None,
        Ok(_) => Some(input_line),
        Err(_) => None,
    }
}

fn read_int() -> i32 {
    parse_input!(read_line().expect("unexpected end of input"), i32)
}

fn read_ints(count: usize) -> Vec<i32> {
    (0..count).map(|_| read_int()).collect()
}

fn main() {
    env_logger::init();

    let size = read_int();
    let princess_count = read_int() as usize;
    let princesses = read_ints(princess_count);
    let monster_count = read_int() as usize;
    let monsters = read_ints(monster_count);
    let knight_count = read_int();

    let scenario = Scenario::from_flat(size, &princesses, &monsters, knight_count)
        .expect("judge sent a malformed scenario");
    let mut strategy = Strategy::new(scenario);

    println!("{}", strategy.entry_directions());
    io::stdout().flush().unwrap();

    // game loop
    loop {
        let Some(line) = read_line() else { break };
        let status_count = parse_input!(line, usize);
        let status = read_ints(status_count);
        let princesses_left = read_int() as usize;
        let monsters_left = read_int() as usize;
        let turns_left = read_int() as usize;

        println!(
            "{}",
            strategy.play(&status, princesses_left, monsters_left, turns_left)
        );
        io::stdout().flush().unwrap();
    }
}
