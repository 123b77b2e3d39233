//! File format input

pub mod dxf;
