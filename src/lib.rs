//! Lyric sync, highlight animation and auto-scroll engine

pub mod features;
