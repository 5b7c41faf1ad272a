pub mod codec;

pub mod manager;

pub mod session;

pub mod signal;

pub mod store;
