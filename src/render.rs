pub mod cpu;
pub mod gradient;
pub mod layout;
pub mod pipeline;
