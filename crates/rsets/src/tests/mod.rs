mod test_reconcile;
pub mod utils;
