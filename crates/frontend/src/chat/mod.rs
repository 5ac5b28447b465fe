pub mod model;
pub mod store;
pub mod view;
pub mod view_model;
