#[cfg(test)]
pub use in_memory::{category, InMemoryCategoryRepository};
