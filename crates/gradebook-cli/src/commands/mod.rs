pub mod check_name;
pub mod init;
pub mod report;
pub mod validate;
