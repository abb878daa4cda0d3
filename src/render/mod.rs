pub mod crop;
pub mod frame;
pub mod pipeline;
pub mod reflect;
pub mod surface;
pub mod word;
