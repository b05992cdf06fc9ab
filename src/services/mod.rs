//! Chat panel services.
//!
//! ARCHITECTURE
//! ============
//! `session` owns the call lifetime and drives `panel`. The panel composes
//! the pure pieces (`tracker`, `quiz`, `unread`) with the one timer-backed
//! piece (`celebration`). `transfer` is the wallet-then-announce flow.

pub mod celebration;
pub mod panel;
pub mod quiz;
pub mod session;
pub mod tracker;
pub mod transfer;
pub mod unread;
