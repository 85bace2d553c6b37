pub mod embeds;
pub mod timing;
