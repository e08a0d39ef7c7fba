pub mod catalog_list;
pub mod favourites_list;
pub mod help_overlay;
pub mod player_bar;
pub mod show_detail;
