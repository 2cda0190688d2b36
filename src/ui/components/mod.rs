pub mod power_bar;
pub mod results;
pub mod score_panel;
pub mod typing_area;
