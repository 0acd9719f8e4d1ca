pub mod browse_cmds;
pub mod views;
