pub mod river_crossing;
pub mod road_map;
