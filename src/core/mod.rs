//! Tick loop and metric rendering

mod render;
mod sampler;

pub use render::{Rendered, Renderer};
pub use sampler::{Sampler, TickReport};
