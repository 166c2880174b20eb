pub mod docs;
pub mod health;
pub mod session;
pub mod slicers;
pub mod stats;
