//! Asset System Adapters

mod in_memory;

pub use in_memory::InMemoryAssetProvider;
