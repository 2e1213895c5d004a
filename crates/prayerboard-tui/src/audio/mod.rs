//! Background music
//!
//! `music` decides what should be heard and when; `player` drives the device.

pub mod music;
pub mod player;

pub use music::{BackgroundMusic, MusicOutput};
pub use player::MusicPlayer;
