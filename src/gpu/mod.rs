mod buffers;
mod context;
mod render;

pub use buffers::GridBuffers;
pub use context::{GpuContext, GpuError};
pub use render::RenderPipeline;
