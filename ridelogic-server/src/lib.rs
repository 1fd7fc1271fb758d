//! RideLogic transit backend.
//!
//! Reads Golden Arrow bus timetables into a registry of stops and
//! times, and interprets riders' free-text route questions against a
//! Cape Town location vocabulary.

pub mod assistant;
pub mod cache;
pub mod documents;
pub mod domain;
pub mod extract;
pub mod fuzzy;
pub mod interpret;
pub mod reports;
pub mod vocabulary;
pub mod web;
