pub mod channels;
pub mod compositor;
pub mod plan;
pub mod timing;
