pub const RAM_MAX: u16 = 0xFFFF;

pub const STACK: u16 = 0x0100;
pub const STACK_RESET: u8 = 0xFD;

pub const RESV_ADDR: u16 = 0xFFFC;
pub const PROGRAM_ADDR: u16 = 0x8000;

// Host conventions shared with the loaded program, not enforced by the CPU.
pub const RNG_ADDR: u16 = 0x00FE;
pub const INPUT_ADDR: u16 = 0x00FF;

pub const SCREEN_ADDR: u16 = 0x0200;
pub const SCREEN_ADDR_END: u16 = 0x0600;
pub const SCREEN_WIDTH: usize = 32;
pub const SCREEN_HEIGHT: usize = 32;
pub const SCREEN_BUFFER_LEN: usize = SCREEN_WIDTH * SCREEN_HEIGHT;
pub const RGB_SCREEN_BUFFER_LEN: usize = SCREEN_BUFFER_LEN * 3;

pub const RNG_MIN: u8 = 1;
pub const RNG_MAX: u8 = 16;
