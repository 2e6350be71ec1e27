mod chat_mode;
mod cli_mode;
mod editor_utils;
mod path_mode;
mod read_mode;
mod trend_mode;
mod use_color;
mod write_mode;

pub use chat_mode::chat_mode;
pub use cli_mode::CliModeResult;
pub use path_mode::path_mode;
pub use read_mode::read_mode;
pub use trend_mode::trend_mode;
pub use use_color::use_color;
pub use write_mode::write_mode;
