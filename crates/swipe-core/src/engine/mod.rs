pub mod machine;
pub mod serialization;
pub mod settle;
