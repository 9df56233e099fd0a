pub mod candidate;
pub mod request;
pub mod ride;
