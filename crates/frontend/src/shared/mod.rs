pub mod api_utils;
pub mod dom_utils;
pub mod icons;
pub mod storage;
