pub(crate) mod auth_service;
pub(crate) mod responses;
pub(crate) mod user_service;
