// Release model: tag parsing, catalog, OS compatibility and selection

pub mod catalog;
pub mod compat;
pub mod selector;
pub mod tag;
