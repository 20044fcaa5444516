pub mod flavor;
pub mod line;
