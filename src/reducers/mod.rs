//! Domain reducers. Each `update` returns true when it consumed the message.

pub mod playground;
pub mod task_detail;
pub mod tasks;
