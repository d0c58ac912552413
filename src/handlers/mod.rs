pub mod crud;
pub mod dental;
pub mod financial;
