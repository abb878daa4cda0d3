pub mod nuts;
pub mod sampler;
