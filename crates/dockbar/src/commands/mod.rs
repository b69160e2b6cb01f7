pub mod init;

#[cfg(windows)]
pub mod daemon;
#[cfg(windows)]
pub mod send;
#[cfg(windows)]
pub mod start;
#[cfg(windows)]
pub mod status;
#[cfg(windows)]
pub mod stop;
