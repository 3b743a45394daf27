pub mod agents;
pub mod meta;
pub mod runs;
