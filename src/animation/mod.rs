pub mod channel;
pub mod curve;
pub mod descriptor;
pub mod dsl;
pub mod ease;
pub mod gradient;
pub mod noise;
