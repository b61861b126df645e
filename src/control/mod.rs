pub mod environment;
pub mod guidance;
pub mod launch_stages;
pub mod payload;
pub mod propulsion;
pub mod structure;
pub mod vehicle;
