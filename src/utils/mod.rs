pub mod batching;
