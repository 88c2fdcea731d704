pub mod service_handler;

pub use service_handler::{
    __path_attach_service, __path_detach_service, __path_list_by_hospital, __path_list_catalog,
    __path_update_service, attach_service, detach_service, list_by_hospital, list_catalog,
    update_service,
};
