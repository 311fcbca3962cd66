pub mod counting_store;
