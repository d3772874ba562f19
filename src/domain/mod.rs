pub mod anim;
pub mod body;
pub mod collision;
pub mod geom;
pub mod room;
pub mod tile;
pub mod tilemap;
