pub mod acquire;
pub mod panels;
pub mod plot;
