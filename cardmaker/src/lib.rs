//! Monster card maker
//!
//! A monster sheet is edited in a form, composed into card content, fitted
//! onto a scroll background whose middle segment repeats as needed, and
//! exported as PNG or copied to the clipboard. `embed::init` mounts the whole
//! editor; the remaining modules are usable on their own.

pub mod action;
pub mod card;
pub mod components;
pub mod config;
pub mod dictionary;
pub mod effect;
pub mod embed;
pub mod export;
pub mod form;
pub mod logging;
pub mod monster;
pub mod persist;
pub mod reducer;
pub mod state;
pub mod storage;
pub mod store;
