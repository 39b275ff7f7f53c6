pub mod carousel;
pub mod render;
pub mod runner;
