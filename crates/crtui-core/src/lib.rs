#![forbid(unsafe_code)]

//! Core: cell geometry and the navigation event vocabulary.
//!
//! Everything above this crate speaks in [`geometry::Rect`] cells and
//! [`event::NavEvent`]s. Raw device input is mapped here and never leaks
//! into the tab engine.

pub mod event;
pub mod geometry;

pub use event::{InputEvent, NavEvent, map_event, map_key};
pub use geometry::{Rect, Sides};
