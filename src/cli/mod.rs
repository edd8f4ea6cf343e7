//! # CLI Module
//!
//! User-facing commands of `playlist-index`.
//!
//! ## Commands
//!
//! - [`serve`] - runs the HTTP server exposing `GET /api/user?userId=<id>`
//! - [`library`] - builds (or reads from cache) one user's track index and
//!   prints it as a table or JSON
//!
//! Both commands read the same [`Settings`](crate::config::Settings). They
//! share cached indexes only when `CACHE_URL` points at Redis; the default
//! `memory` store is private to one process.
//!
//! ## Usage Patterns
//!
//! ```bash
//! playlist-index serve                                # listen on SERVER_ADDRESS
//! playlist-index library someuser                     # table of shared tracks
//! playlist-index library someuser --playlists         # distinct playlists
//! playlist-index library someuser --playlist 37i9dQ   # tracks of one playlist
//! playlist-index library someuser --json              # raw index
//! ```
//!
//! Status lines use the crate's `info!`/`success!`/`warning!`/`error!`
//! macros; fatal problems end the process through `error!`.

mod library;
mod serve;

pub use library::LibraryView;
pub use library::library;
pub use serve::serve;
