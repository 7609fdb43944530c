pub(crate) mod follow_repository;
pub(crate) mod post_repository;
pub(crate) mod user_repository;
