pub mod compare;
pub mod terms;
