pub mod resource_address_list;

pub use resource_address_list::AddressListResource;
