pub mod consumers;
pub mod feed;
pub mod publish;
pub mod server;
pub mod streams;
