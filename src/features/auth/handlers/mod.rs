pub mod auth_handler;

pub use auth_handler::{
    __path_admin_login, __path_get_profile, __path_login, __path_logout, __path_update_profile,
    admin_login, get_profile, login, logout, update_profile,
};
