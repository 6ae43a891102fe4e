pub mod address_list;

pub use address_list::{AddressList, AddressListAddress};
