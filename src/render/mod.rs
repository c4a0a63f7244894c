//! CPU rasterization: draw ops, label text, surfaces, halos and compositing.

pub mod composite;
pub mod cpu;
pub mod draw;
pub mod halo;
pub mod text;

pub use cpu::{CpuSurface, FrameRGBA};
pub use draw::DrawOp;
pub use text::{FontSource, TextEngine};
