mod commands;
mod handlers;

pub use commands::{Cli, Commands, ServeArgs};
pub use handlers::{
    handle_add, handle_delete, handle_folders, handle_get, handle_list, handle_serve,
    handle_update,
};
