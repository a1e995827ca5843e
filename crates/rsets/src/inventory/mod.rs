mod facts;
mod table;
pub mod worker;

pub use facts::GlobalResourceFacts;
pub use table::{ResourceSet, RsetInventory};
pub use worker::WorkerResources;
