pub mod reconcile;
pub mod scheduler;
