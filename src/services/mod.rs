pub mod avatar;
pub mod github;
