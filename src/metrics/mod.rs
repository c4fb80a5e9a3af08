pub mod amplitude;
pub mod collector;
pub mod flow_event;
