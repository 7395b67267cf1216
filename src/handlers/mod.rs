pub mod fallback;
pub mod fault;
pub mod rest;
