//! Command contract and the demo commands shipped with `cli-demo`

pub mod base;
pub mod custom_writer_demo;
pub mod panic_demo;
pub mod say_hello;
pub mod say_hello_dynamic;

pub use base::{Command, Configurable};
pub use custom_writer_demo::CustomWriterDemo;
pub use panic_demo::PanicDemo;
pub use say_hello::SayHello;
pub use say_hello_dynamic::{SayHelloDynamic, SayHelloFlags};
