pub mod builders;

// Re-export commonly used items
pub use builders::EventBuilder;
pub use component::ComponentTestHarness;

pub const TEST_TERMINAL_WIDTH: u16 = 100;
pub const TEST_TERMINAL_HEIGHT: u16 = 24;
