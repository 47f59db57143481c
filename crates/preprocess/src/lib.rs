pub mod config;
pub mod cpu;
pub mod frame;
pub mod pack;

pub use config::{DEFAULT_INPUT_SIZE, RGB_CHANNELS};
pub use cpu::ImageResizer;
pub use frame::ModelImage;
pub use pack::{PackedInput, pack};
