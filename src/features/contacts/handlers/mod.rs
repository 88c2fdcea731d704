pub mod contact_handler;

pub use contact_handler::{
    __path_list_contacts, __path_submit_contact, __path_update_contact_status, list_contacts,
    submit_contact, update_contact_status,
};
