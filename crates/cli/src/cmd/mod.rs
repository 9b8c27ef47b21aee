mod build;
mod info;
mod options;
mod plan;

pub use build::cmd_build;
pub use info::cmd_info;
pub use options::cmd_options;
pub use plan::cmd_plan;
