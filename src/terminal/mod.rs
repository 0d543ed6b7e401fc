pub mod color;
pub mod display;
pub mod events;
pub mod preview;
pub mod raw;
pub mod render;
