pub mod metadata_row;
pub mod request;
pub mod response;
