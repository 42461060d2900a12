/// terminal logger of the binary
pub mod logger;
