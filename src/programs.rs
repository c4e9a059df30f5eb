use crate::consts::SCREEN_ADDR;

/// Origin the snake game is assembled for.
pub const SNAKE_ORIGIN: u16 = SCREEN_ADDR + 0x0400;

/// Snake, 32x32 frame buffer at 0x0200, direction key at 0x00FF, random byte
/// at 0x00FE. Game over jumps just past the program and lands on a BRK.
pub const SNAKE: &[u8] = &[
    0x20, 0x06, 0x06, 0x20, 0x38, 0x06, 0x20, 0x0d, 0x06, 0x20, 0x2a, 0x06, 0x60, 0xa9, 0x02, 0x85,
    0x02, 0xa9, 0x04, 0x85, 0x03, 0xa9, 0x11, 0x85, 0x10, 0xa9, 0x10, 0x85, 0x12, 0xa9, 0x0f, 0x85,
    0x14, 0xa9, 0x04, 0x85, 0x11, 0x85, 0x13, 0x85, 0x15, 0x60, 0xa5, 0xfe, 0x85, 0x00, 0xa5, 0xfe,
    0x29, 0x03, 0x18, 0x69, 0x02, 0x85, 0x01, 0x60, 0x20, 0x4d, 0x06, 0x20, 0x8d, 0x06, 0x20, 0xc3,
    0x06, 0x20, 0x19, 0x07, 0x20, 0x20, 0x07, 0x20, 0x2d, 0x07, 0x4c, 0x38, 0x06, 0xa5, 0xff, 0xc9,
    0x77, 0xf0, 0x0d, 0xc9, 0x64, 0xf0, 0x14, 0xc9, 0x73, 0xf0, 0x1b, 0xc9, 0x61, 0xf0, 0x22, 0x60,
    0xa9, 0x04, 0x24, 0x02, 0xd0, 0x26, 0xa9, 0x01, 0x85, 0x02, 0x60, 0xa9, 0x08, 0x24, 0x02, 0xd0,
    0x1b, 0xa9, 0x02, 0x85, 0x02, 0x60, 0xa9, 0x01, 0x24, 0x02, 0xd0, 0x10, 0xa9, 0x04, 0x85, 0x02,
    0x60, 0xa9, 0x02, 0x24, 0x02, 0xd0, 0x05, 0xa9, 0x08, 0x85, 0x02, 0x60, 0x60, 0x20, 0x94, 0x06,
    0x20, 0xa8, 0x06, 0x60, 0xa5, 0x00, 0xc5, 0x10, 0xd0, 0x0d, 0xa5, 0x01, 0xc5, 0x11, 0xd0, 0x07,
    0xe6, 0x03, 0xe6, 0x03, 0x20, 0x2a, 0x06, 0x60, 0xa2, 0x02, 0xb5, 0x10, 0xc5, 0x10, 0xd0, 0x06,
    0xb5, 0x11, 0xc5, 0x11, 0xf0, 0x09, 0xe8, 0xe8, 0xe4, 0x03, 0xf0, 0x06, 0x4c, 0xaa, 0x06, 0x4c,
    0x35, 0x07, 0x60, 0xa6, 0x03, 0xca, 0x8a, 0xb5, 0x10, 0x95, 0x12, 0xca, 0x10, 0xf9, 0xa5, 0x02,
    0x4a, 0xb0, 0x09, 0x4a, 0xb0, 0x19, 0x4a, 0xb0, 0x1f, 0x4a, 0xb0, 0x2f, 0xa5, 0x10, 0x38, 0xe9,
    0x20, 0x85, 0x10, 0x90, 0x01, 0x60, 0xc6, 0x11, 0xa9, 0x01, 0xc5, 0x11, 0xf0, 0x28, 0x60, 0xe6,
    0x10, 0xa9, 0x1f, 0x24, 0x10, 0xf0, 0x1f, 0x60, 0xa5, 0x10, 0x18, 0x69, 0x20, 0x85, 0x10, 0xb0,
    0x01, 0x60, 0xe6, 0x11, 0xa9, 0x06, 0xc5, 0x11, 0xf0, 0x0c, 0x60, 0xc6, 0x10, 0xa5, 0x10, 0x29,
    0x1f, 0xc9, 0x1f, 0xf0, 0x01, 0x60, 0x4c, 0x35, 0x07, 0xa0, 0x00, 0xa5, 0xfe, 0x91, 0x00, 0x60,
    0xa6, 0x03, 0xa9, 0x00, 0x81, 0x10, 0xa2, 0x00, 0xa9, 0x01, 0x81, 0x10, 0x60, 0xa2, 0x00, 0xea,
    0xea, 0xca, 0xd0, 0xfb, 0x60,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{INPUT_ADDR, RNG_ADDR, RNG_MAX, RNG_MIN, SCREEN_ADDR_END};
    use crate::cpu::{Cpu, StepOutcome};
    use crate::input::Direction;
    use crate::screen::Screen;

    fn snake() -> Cpu {
        let mut cpu = Cpu::new();
        cpu.load_at(SNAKE, SNAKE_ORIGIN);
        cpu.reset();
        cpu
    }

    // Steps until BRK, feeding a deterministic byte in place of the RNG.
    fn play(cpu: &mut Cpu, screen: &mut Screen, max_steps: usize) -> Option<usize> {
        let mut rng = RNG_MIN;
        for n in 0..max_steps {
            cpu.mem_write(RNG_ADDR, rng);
            rng = if rng + 1 >= RNG_MAX { RNG_MIN } else { rng + 1 };
            let outcome = cpu.step().unwrap();
            screen.update(cpu);
            if outcome == StepOutcome::Halt {
                return Some(n);
            }
        }
        None
    }

    #[test]
    fn loads_at_origin() {
        let cpu = snake();
        assert_eq!(SNAKE_ORIGIN, 0x0600);
        assert_eq!(SNAKE.len(), 309);
        assert_eq!(cpu.pc(), 0x0600);
        assert_eq!(cpu.mem_read(0x0600), 0x20);
        assert_eq!(cpu.mem_read(SNAKE_ORIGIN + SNAKE.len() as u16), 0x00);
    }

    #[test]
    fn init_places_the_snake() {
        let mut cpu = snake();
        let mut screen = Screen::new();
        // Two JSRs, the 14 instructions of init and its RTS.
        for _ in 0..17 {
            assert_eq!(cpu.step(), Ok(StepOutcome::Continue));
        }
        assert_eq!(cpu.mem_read(0x02), 2);
        assert_eq!(cpu.mem_read(0x03), 4);
        assert_eq!(cpu.mem_read_u16(0x10), 0x0411);
        assert_eq!(cpu.mem_read_u16(0x12), 0x0410);
        assert_eq!(cpu.mem_read_u16(0x14), 0x040F);
        assert_eq!(cpu.pc(), 0x0609);
        assert!(!screen.update(&cpu));
    }

    #[test]
    fn snake_draws_and_hits_the_wall() {
        let mut cpu = snake();
        let mut screen = Screen::new();
        let steps = play(&mut cpu, &mut screen, 1_000_000);
        assert!(steps.is_some());
        assert_eq!(cpu.pc(), 0x0736);
        let drawn = cpu.ram().as_slice()[SCREEN_ADDR as usize..SCREEN_ADDR_END as usize]
            .iter()
            .filter(|&&c| c != 0)
            .count();
        assert!(drawn > 0);
    }

    #[test]
    fn direction_key_turns_the_snake() {
        let mut cpu = snake();
        Direction::Down.write_to(&mut cpu);
        let mut steps = 0;
        while cpu.mem_read(0x02) != 4 && steps < 10_000 {
            cpu.mem_write(RNG_ADDR, 5);
            cpu.step().unwrap();
            steps += 1;
        }
        assert_eq!(cpu.mem_read(0x02), 4);
        assert_eq!(cpu.mem_read(INPUT_ADDR), b's');
    }
}
