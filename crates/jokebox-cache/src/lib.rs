// SQLite-backed key/value slots
// Each slot holds one whole value, written and read atomically

pub mod cache;

pub use cache::SlotCache;
