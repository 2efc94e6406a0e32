//! Catalog, view derivation and console command library behind the
//! Obenseuer item viewer front-ends.

pub mod core_api;
