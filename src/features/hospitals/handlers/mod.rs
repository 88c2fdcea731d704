pub mod hospital_handler;

pub use hospital_handler::{
    __path_create_hospital, __path_delete_hospital, __path_get_hospital, __path_import_hospitals,
    __path_list_hospitals, __path_update_hospital, create_hospital, delete_hospital, get_hospital,
    import_hospitals, list_hospitals, update_hospital, HospitalAdminState,
};
