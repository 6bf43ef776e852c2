pub mod dirs;
pub mod index;
pub mod init;
pub mod serve;
