//! Durable session storage adapters.

mod atomic_io;
mod file;

pub use file::FileSessionStorage;
