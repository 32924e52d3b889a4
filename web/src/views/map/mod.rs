pub mod create_lair_form;
pub mod lair_detail;
pub mod lair_marker;
pub mod map_renderer;
pub mod map_wrapper;
