//! Torrent throttle control.
//!
//! This module manages the torrent client's alternative speed limits: a
//! `ThrottleSession` trait for the wire primitives (login, mode read,
//! toggle), a qBittorrent implementation, and a `ThrottleController` that
//! layers the confirm-after-toggle protocol on top.

mod controller;
mod qbittorrent;
mod types;

pub use controller::ThrottleController;
pub use qbittorrent::QBittorrentSession;
pub use types::*;
