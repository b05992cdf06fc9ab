//! In-call chat panel core: payload decoding, side-effect tracking, quiz
//! and celebration state, and token transfer announcements.

pub mod config;
pub mod error;
pub mod peers;
pub mod services;
pub mod state;
pub mod transport;
pub mod wallet;
