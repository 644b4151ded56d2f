pub mod api_utils;
pub mod components;
pub mod date_utils;
pub mod icons;
pub mod notify;
pub mod number_format;
pub mod page_frame;
