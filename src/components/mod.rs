pub mod breadcrumb_bar;
pub mod sidebar;
pub mod status_badge;
