pub mod employe_cache;
pub mod pagination;
