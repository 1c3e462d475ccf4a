pub mod booking;
pub mod item;
pub mod request;
pub mod review;
pub mod user;
