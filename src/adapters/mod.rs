// Adapters layer: concrete implementations of the domain ports (storage, clock).

pub mod clock;
pub mod json_file;
pub mod memory;

pub use clock::{FixedClock, SystemClock};
pub use json_file::JsonFileRepository;
pub use memory::InMemoryRepository;
