// Storage tests

mod snapshot_store_test;
