pub mod aggregate_service;
pub mod analysis_service;
pub mod chart_service;
pub mod render_service;
