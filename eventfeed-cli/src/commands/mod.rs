pub mod sync;
pub mod sync_all;
pub mod update_images;
