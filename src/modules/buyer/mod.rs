pub mod controller;
pub mod router;
