pub mod policy_number;

pub use policy_number::PolicyNumber;
