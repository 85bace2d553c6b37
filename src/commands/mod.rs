pub mod moderation;
pub mod setup;
