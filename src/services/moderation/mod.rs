pub mod mute_service;
pub mod role_client;
