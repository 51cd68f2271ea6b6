//! Bandalign Core Types and Definitions
//!
//! This crate provides the foundational types for heterojunction band-alignment
//! diagrams. It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Strokes, text styles and SVG layering ([`draw`] module)
//! - **Junctions**: The junction data model ([`junction`] module)
//! - **Primitives**: Layout output consumed by renderers ([`primitive`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod junction;
pub mod primitive;
