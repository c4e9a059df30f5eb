use log::trace;

use crate::consts::{RGB_SCREEN_BUFFER_LEN, SCREEN_ADDR, SCREEN_ADDR_END, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::cpu::Cpu;

pub type Rgb = [u8; 3];

pub const BLACK: Rgb = [0, 0, 0];
pub const WHITE: Rgb = [255, 255, 255];
pub const GREY: Rgb = [128, 128, 128];
pub const RED: Rgb = [255, 0, 0];
pub const GREEN: Rgb = [0, 255, 0];
pub const BLUE: Rgb = [0, 0, 255];
pub const MAGENTA: Rgb = [255, 0, 255];
pub const YELLOW: Rgb = [255, 255, 0];
pub const CYAN: Rgb = [0, 255, 255];

/// Colour of a frame buffer cell. Indices 9 to 14 repeat 2 to 7.
#[must_use]
pub fn color(index: u8) -> Rgb {
    match index {
        0 => BLACK,
        1 => WHITE,
        2 | 9 => GREY,
        3 | 10 => RED,
        4 | 11 => GREEN,
        5 | 12 => BLUE,
        6 | 13 => MAGENTA,
        7 | 14 => YELLOW,
        _ => CYAN,
    }
}

/// RGB view of the 32x32 frame buffer at 0x0200..0x0600.
pub struct Screen {
    rgb_buffer: Vec<u8>,
}

impl Screen {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rgb_buffer: vec![0; RGB_SCREEN_BUFFER_LEN],
        }
    }

    /// Redraws from `cpu` memory, returns true when any pixel changed.
    pub fn update(&mut self, cpu: &Cpu) -> bool {
        let cells = &cpu.ram().as_slice()[SCREEN_ADDR as usize..SCREEN_ADDR_END as usize];
        let mut changed = false;
        for (pixel, &index) in self.rgb_buffer.chunks_exact_mut(3).zip(cells) {
            let rgb = color(index);
            if *pixel != rgb[..] {
                pixel.copy_from_slice(&rgb);
                changed = true;
            }
        }
        if changed {
            trace!("Screen updated");
        }
        changed
    }

    /// `None` outside the 32x32 grid.
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            return None;
        }
        let i = (y * SCREEN_WIDTH + x) * 3;
        Some([self.rgb_buffer[i], self.rgb_buffer[i + 1], self.rgb_buffer[i + 2]])
    }

    #[must_use]
    pub fn rgb_screen(&self) -> &Vec<u8> {
        &self.rgb_buffer
    }

    pub const fn size(&self) -> (usize, usize) {
        (SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette() {
        assert_eq!(color(0), BLACK);
        assert_eq!(color(1), WHITE);
        assert_eq!(color(2), color(9));
        assert_eq!(color(3), RED);
        assert_eq!(color(10), RED);
        assert_eq!(color(7), color(14));
        assert_eq!(color(8), CYAN);
        assert_eq!(color(15), CYAN);
        assert_eq!(color(0xFF), CYAN);
    }

    #[test]
    fn blank_memory_does_not_redraw() {
        let cpu = Cpu::new();
        let mut screen = Screen::new();
        assert!(!screen.update(&cpu));
        assert!(screen.rgb_screen().iter().all(|&b| b == 0));
    }

    #[test]
    fn update_reports_changes_once() {
        let mut cpu = Cpu::new();
        let mut screen = Screen::new();
        cpu.mem_write(SCREEN_ADDR, 1);
        cpu.mem_write(SCREEN_ADDR + 33, 3);
        cpu.mem_write(SCREEN_ADDR_END - 1, 5);
        assert!(screen.update(&cpu));
        assert_eq!(screen.pixel(0, 0), Some(WHITE));
        assert_eq!(screen.pixel(1, 1), Some(RED));
        assert_eq!(screen.pixel(31, 31), Some(BLUE));
        assert_eq!(screen.pixel(2, 0), Some(BLACK));
        assert!(!screen.update(&cpu));
    }

    #[test]
    fn pixel_outside_grid() {
        let screen = Screen::new();
        assert_eq!(screen.pixel(31, 31), Some(BLACK));
        assert_eq!(screen.pixel(32, 0), None);
        assert_eq!(screen.pixel(0, 32), None);
    }

    #[test]
    fn memory_outside_frame_buffer_is_ignored() {
        let mut cpu = Cpu::new();
        let mut screen = Screen::new();
        cpu.mem_write(SCREEN_ADDR - 1, 1);
        cpu.mem_write(SCREEN_ADDR_END, 1);
        assert!(!screen.update(&cpu));
    }
}
