pub mod badge;
pub mod pagination_controls;
