mod config;
mod parse;
mod serve;
mod status;
mod upload;

pub use config::ConfigCommand;
pub use parse::ParseArgs;
pub use serve::ServeArgs;
pub use upload::UploadArgs;

pub use config::handle_config;
pub use parse::handle_parse;
pub use serve::handle_serve;
pub use status::handle_status;
pub use upload::handle_upload;
