//! Phone metadata capability and its `phonenumber`-backed implementation.

pub(crate) mod libphonenumber;
pub(crate) mod template;
pub(crate) mod traits;

pub use libphonenumber::LibPhoneNumberService;
pub use traits::PhoneNumberService;
