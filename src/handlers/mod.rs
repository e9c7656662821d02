pub mod health;
pub mod leads;
