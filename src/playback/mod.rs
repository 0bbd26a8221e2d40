pub mod animator;
pub mod typewriter;
