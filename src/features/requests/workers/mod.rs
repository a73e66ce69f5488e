pub mod redispatch_worker;

pub use redispatch_worker::RedispatchWorker;
