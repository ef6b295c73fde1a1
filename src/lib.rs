//! Updates OpenPecha meta.yml records with per-volume info parsed from the
//! BDRC catalog's Turtle graphs.

pub mod app;
pub mod bdrc;
pub mod domain;
pub mod error;
pub mod graph;
pub mod meta;
pub mod openpecha;
pub mod volumes;
