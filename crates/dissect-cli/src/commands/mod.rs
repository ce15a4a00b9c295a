pub mod check;
pub mod init;
pub mod play;
pub mod sections;
pub mod summary;
