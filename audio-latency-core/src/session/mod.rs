pub mod alignment_feed;
pub mod capture_hook;
pub mod subscription;
