pub mod booking;
pub mod id;
pub mod item;
pub mod list;
pub mod request;
pub mod review;
pub mod user;
