pub mod config;
pub mod error;
pub mod eut;
pub mod proto;
pub mod sim;
pub mod tb;

#[cfg(test)]
mod test;
