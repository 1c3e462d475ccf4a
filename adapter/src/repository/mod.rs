pub mod booking;
pub mod health;
pub mod item;
pub mod request;
pub mod review;
pub mod user;
