pub mod logging;
pub mod poll;

pub use logging::truncate_text;
pub use poll::poll_until;
