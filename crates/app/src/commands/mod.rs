pub mod play;
pub mod preview;
pub mod seed;
