pub mod bubbles;
pub mod layout;
pub mod palette;
pub mod typewriter;
