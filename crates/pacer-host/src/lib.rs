//! Desktop platform layer for the pacer reader: settings on disk, terminal
//! output, stdin commands and the remote quiz client.

pub mod input;
pub mod quiz;
pub mod render;
pub mod storage;
