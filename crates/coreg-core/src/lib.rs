pub mod align;
pub mod backend;
pub mod config;
pub mod consts;
pub mod coreg;
pub mod driver;
pub mod error;
pub mod grid;
pub mod mask;
pub mod pan;
pub mod progress;
pub mod resample;
pub mod warp;
