//! Core library for openshelf, a terminal client for an open content
//! archive (book and audio catalog browsing, search, favorites).
//!
//! The crate is organized around one coordination pattern: every screen
//! folds its asynchronous data sources, an outstanding-work counter, and
//! a queue of one-shot user messages into a single immutable snapshot
//! that the presentation layer renders. See [`state`] for the primitives
//! and [`screens`] for the controllers built on top of them.

pub mod config;
pub mod data;
pub mod domain;
pub mod navigation;
pub mod screens;
pub mod state;
