//! Push-button clip player: each button toggle plays the next clip and cues an
//! external light controller over serial while it plays.

pub mod config;
pub mod controller;
pub mod error;
pub mod gpio;
pub mod input;
pub mod link;
pub mod player;
pub mod playlist;
