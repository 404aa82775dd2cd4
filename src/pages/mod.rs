pub mod home;
pub mod playground;
pub mod task_detail;
pub mod tasks;
