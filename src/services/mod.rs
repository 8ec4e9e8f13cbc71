pub mod chart_service;
pub mod window_service;
