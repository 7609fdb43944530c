pub(crate) mod file_storage;
pub(crate) mod follow_repository;
pub(crate) mod post_repository;
pub(crate) mod repositories;
pub(crate) mod user_repository;
