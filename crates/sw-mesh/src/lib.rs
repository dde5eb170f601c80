pub mod buffers;
pub mod raycast;
pub mod tessellator;

pub use buffers::MeshBuffers;
pub use raycast::RayHit;
pub use tessellator::{TessellationSettings, Tessellator};
