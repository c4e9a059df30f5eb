use std::io::{self, BufRead};
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::{error, info};
use parking_lot::Mutex;
use rand::Rng;

use pocket6502::consts::{PROGRAM_ADDR, RNG_ADDR, RNG_MAX, RNG_MIN};
use pocket6502::programs::{SNAKE, SNAKE_ORIGIN};
use pocket6502::screen::BLACK;
use pocket6502::{Cpu, CpuError, Direction, Screen};

const STEP_INTERVAL: Duration = Duration::from_micros(88);
const FRAME_INTERVAL: Duration = Duration::from_millis(50);

struct Shared {
    screen: Mutex<Screen>,
    redraw_requested: AtomicBool,
    input: Mutex<Option<Direction>>,
}

fn load_program(args: &[String]) -> Result<(Vec<u8>, u16), String> {
    match args {
        [] => Ok((SNAKE.to_vec(), SNAKE_ORIGIN)),
        [path, rest @ ..] => {
            let data = std::fs::read(path).map_err(|e| format!("{}: {}", path, e))?;
            let origin = match rest.first() {
                Some(hex) => u16::from_str_radix(hex.trim_start_matches("0x"), 16)
                    .map_err(|e| format!("origin '{}': {}", hex, e))?,
                None => PROGRAM_ADDR,
            };
            Ok((data, origin))
        }
    }
}

fn redraw(cpu: &Cpu, shared: &Shared) {
    if shared.screen.lock().update(cpu) {
        shared.redraw_requested.store(true, Ordering::Release);
    }
}

// The hook runs before every step, so it also picks up the frame drawn by the
// previous one.
fn run(mut cpu: Cpu, shared: Arc<Shared>) -> Result<(), CpuError> {
    let mut rng = rand::rng();
    let mut first = true;
    let result = cpu.run_with_callback(|cpu| {
        if first {
            first = false;
        } else {
            redraw(cpu, &shared);
            thread::sleep(STEP_INTERVAL);
        }
        if let Some(direction) = shared.input.lock().take() {
            direction.write_to(cpu);
        }
        cpu.mem_write(RNG_ADDR, rng.random_range(RNG_MIN..RNG_MAX));
    });
    redraw(&cpu, &shared);
    if result.is_ok() {
        info!("Halted: {:?}", cpu);
    }
    result
}

fn draw(screen: &Screen) -> String {
    let (width, height) = screen.size();
    let mut frame = String::with_capacity((width * 2 + 1) * height + 8);
    frame.push_str("\x1b[H");
    for y in 0..height {
        for x in 0..width {
            frame.push_str(if screen.pixel(x, y) == Some(BLACK) { "  " } else { "##" });
        }
        frame.push('\n');
    }
    frame
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (program, origin) = match load_program(&args) {
        Ok(p) => p,
        Err(e) => {
            error!("{}", e);
            eprintln!("usage: pocket6502 [PROGRAM.bin [ORIGIN_HEX]]");
            return ExitCode::FAILURE;
        }
    };

    let mut cpu = Cpu::new();
    cpu.load_at(&program, origin);
    cpu.reset();

    let shared = Arc::new(Shared {
        screen: Mutex::new(Screen::new()),
        redraw_requested: AtomicBool::new(false),
        input: Mutex::new(None),
    });

    let input = Arc::clone(&shared);
    thread::spawn(move || {
        for line in io::stdin().lock().lines().map_while(Result::ok) {
            if let Some(direction) = line.chars().find_map(Direction::from_key) {
                *input.input.lock() = Some(direction);
            }
        }
    });

    let worker = {
        let shared = Arc::clone(&shared);
        thread::spawn(move || run(cpu, shared))
    };

    print!("\x1b[2J");
    loop {
        let finished = worker.is_finished();
        if shared.redraw_requested.swap(false, Ordering::Acquire) {
            print!("{}", draw(&shared.screen.lock()));
        }
        if finished {
            break;
        }
        thread::sleep(FRAME_INTERVAL);
    }

    match worker.join() {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(e)) => {
            error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
        Err(_) => ExitCode::FAILURE,
    }
}
